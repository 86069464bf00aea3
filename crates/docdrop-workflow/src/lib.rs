//! Docdrop Workflow Layer
//!
//! This crate is the business layer of the upload form: it owns the explicit
//! form state (fields, pending files, activity log), drives the
//! store-then-patch chain per file, resolves which candidate libraries the
//! current principal may upload into, and maps field kinds to form controls.
//! Keep coordination here; keep remote protocol details in docdrop-store.

pub mod bootstrap;
pub mod controls;
pub mod permissions;
pub mod state;
pub mod uploader;

pub use bootstrap::bootstrap_form;
pub use controls::{control_for, Control};
pub use permissions::resolve_libraries;
pub use state::{FormHandle, FormState};
pub use uploader::Uploader;

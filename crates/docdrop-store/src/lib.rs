//! Docdrop Store Library
//!
//! This crate provides the document store abstraction and its backends.
//! The `DocumentStore` trait covers everything the upload workflow needs
//! from the remote side: list enumeration, field schema lookup, permission
//! probing, file placement, item-id resolution, and metadata patching.
//!
//! # Backends
//!
//! - **Local** (`store-local`): a filesystem-backed store. Each library path
//!   maps to a directory under the base path; item metadata lives in a
//!   per-library `manifest.json` and the remote-side fixtures (lists, field
//!   schemas, permissions) in a `site.json` at the base.
//! - **REST** (`store-rest`): a `reqwest` client against a remote list API.

pub mod factory;
#[cfg(feature = "store-local")]
pub mod local;
#[cfg(feature = "store-rest")]
pub mod rest;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
#[cfg(feature = "store-local")]
pub use local::{LocalDocumentStore, SiteList, SiteManifest};
#[cfg(feature = "store-rest")]
pub use rest::RestDocumentStore;
pub use traits::{DocumentStore, ListInfo, StoreError, StoreResult};

//! Docdrop Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Docdrop components: metadata fields and their typed
//! values, pending upload files, destination libraries, and the activity log.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{FieldDef, LibraryDef, StoreConfig, UploadConfig};
pub use error::FormError;
pub use models::{
    ActivityEntry, ActivityLevel, Field, FieldKind, FieldSchema, FieldValue, Library, PendingFile,
};

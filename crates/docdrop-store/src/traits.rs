//! Document store abstraction trait
//!
//! This module defines the DocumentStore trait that all backends must
//! implement, plus the store-side error taxonomy.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use docdrop_core::models::{FieldSchema, FieldValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// An object with the same name already exists and overwrite was not
    /// requested. Surfaced to the user with a dedicated message; every
    /// backend must report this distinguishably rather than replacing
    /// content silently.
    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store failed: {0}")]
    StoreFailed(String),

    #[error("Metadata patch failed: {0}")]
    PatchFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A remote list, as enumerated for schema selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInfo {
    pub id: Uuid,
    pub title: String,
}

/// Document store abstraction trait
///
/// All backends (local filesystem, REST) must implement this trait so the
/// upload workflow stays decoupled from the remote protocol. A store is
/// constructed for one site; every operation is scoped to it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Enumerate the lists available on the site.
    async fn list_lists(&self) -> StoreResult<Vec<ListInfo>>;

    /// Fetch the schemas of the named fields of a list. Names with no
    /// matching field are silently absent from the result.
    async fn list_fields(
        &self,
        list_id: Uuid,
        internal_names: &[String],
    ) -> StoreResult<Vec<FieldSchema>>;

    /// Whether the current principal may add items to the named library.
    async fn has_add_permission(&self, library_title: &str) -> StoreResult<bool>;

    /// Place a file's bytes under the library path using the exact name.
    ///
    /// With `overwrite` false, an existing object of the same name fails
    /// with `StoreError::AlreadyExists`.
    async fn store_file(
        &self,
        library_path: &str,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()>;

    /// Resolve the item identifier of a stored file.
    async fn item_id(&self, library_path: &str, file_name: &str) -> StoreResult<u64>;

    /// Apply field values to an item, keyed by internal field name.
    async fn patch_item(
        &self,
        library_title: &str,
        item_id: u64,
        values: &BTreeMap<String, FieldValue>,
    ) -> StoreResult<()>;
}

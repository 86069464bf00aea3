#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use docdrop_core::config::LibraryDef;
use docdrop_core::models::{Field, FieldKind, FieldSchema, FieldValue, Library, PendingFile};
use docdrop_store::{
    DocumentStore, ListInfo, LocalDocumentStore, SiteList, SiteManifest, StoreError, StoreResult,
};
use docdrop_workflow::{FormHandle, FormState};
use tempfile::TempDir;
use uuid::Uuid;

/// A local store seeded with one list ("Documents": Title + Category
/// fields) and two libraries ("Shared Documents" -> shared,
/// "Archive" -> archive), all permissions granted.
pub struct TestSite {
    pub dir: TempDir,
    pub store: Arc<LocalDocumentStore>,
    pub list_id: Uuid,
}

pub async fn setup_site() -> TestSite {
    setup_site_with_permissions(BTreeMap::new()).await
}

pub async fn setup_site_with_permissions(permissions: BTreeMap<String, bool>) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalDocumentStore::new(dir.path()).await.unwrap();
    let list_id = Uuid::new_v4();

    store
        .write_site_manifest(&SiteManifest {
            lists: vec![SiteList {
                id: list_id,
                title: "Documents".to_string(),
                fields: vec![
                    text_schema("Title"),
                    FieldSchema {
                        internal_name: "Category".to_string(),
                        title: "Category".to_string(),
                        kind: FieldKind::Choice,
                        description: None,
                        choices: Some(vec!["Report".to_string(), "Invoice".to_string()]),
                        allow_fill_in: Some(false),
                    },
                ],
            }],
            libraries: vec![
                LibraryDef {
                    title: "Shared Documents".to_string(),
                    path: "shared".to_string(),
                },
                LibraryDef {
                    title: "Archive".to_string(),
                    path: "archive".to_string(),
                },
            ],
            permissions,
        })
        .await
        .unwrap();

    TestSite {
        dir,
        store: Arc::new(store),
        list_id,
    }
}

pub fn text_schema(name: &str) -> FieldSchema {
    FieldSchema {
        internal_name: name.to_string(),
        title: name.to_string(),
        kind: FieldKind::Text,
        description: None,
        choices: None,
        allow_fill_in: None,
    }
}

pub fn pending_file(name: &str) -> PendingFile {
    PendingFile::new(name, "text/plain", Bytes::from(format!("content of {}", name)))
}

/// A form ready to submit into "Shared Documents": both fields filled,
/// library selected, given files pending.
pub fn ready_form(files: Vec<PendingFile>) -> FormHandle {
    let mut state = FormState::new(vec![
        Field::new(text_schema("Title"), 1),
        Field::new(text_schema("Category"), 2),
    ]);
    state.add_library(Library::new("Shared Documents", "shared"));
    state.add_library(Library::new("Archive", "archive"));
    state.select_library("Shared Documents").unwrap();
    state
        .set_field_value("Title", FieldValue::Text("Quarterly report".to_string()))
        .unwrap();
    state
        .set_field_value("Category", FieldValue::Text("Report".to_string()))
        .unwrap();
    state.set_files(files).unwrap();
    FormHandle::new(state)
}

/// Store wrapper that injects failures for specific operations.
pub struct FaultyStore {
    pub inner: Arc<dyn DocumentStore>,
    /// Permission probes for these titles fail with a backend error.
    pub fail_probe_titles: Vec<String>,
    /// Metadata patches for items of these files fail.
    pub fail_patch_files: Vec<String>,
}

impl FaultyStore {
    pub fn wrap(inner: Arc<dyn DocumentStore>) -> Self {
        FaultyStore {
            inner,
            fail_probe_titles: Vec::new(),
            fail_patch_files: Vec::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn list_lists(&self) -> StoreResult<Vec<ListInfo>> {
        self.inner.list_lists().await
    }

    async fn list_fields(
        &self,
        list_id: Uuid,
        internal_names: &[String],
    ) -> StoreResult<Vec<FieldSchema>> {
        self.inner.list_fields(list_id, internal_names).await
    }

    async fn has_add_permission(&self, library_title: &str) -> StoreResult<bool> {
        if self.fail_probe_titles.iter().any(|t| t == library_title) {
            return Err(StoreError::Backend("probe unavailable".to_string()));
        }
        self.inner.has_add_permission(library_title).await
    }

    async fn store_file(
        &self,
        library_path: &str,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        self.inner
            .store_file(library_path, file_name, content_type, data, overwrite)
            .await
    }

    async fn item_id(&self, library_path: &str, file_name: &str) -> StoreResult<u64> {
        if self.fail_patch_files.iter().any(|f| f == file_name) {
            return Err(StoreError::PatchFailed("item lookup unavailable".to_string()));
        }
        self.inner.item_id(library_path, file_name).await
    }

    async fn patch_item(
        &self,
        library_title: &str,
        item_id: u64,
        values: &BTreeMap<String, FieldValue>,
    ) -> StoreResult<()> {
        self.inner.patch_item(library_title, item_id, values).await
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use docdrop_core::config::LibraryDef;
use docdrop_core::models::{FieldSchema, FieldValue};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::traits::{DocumentStore, ListInfo, StoreError, StoreResult};

/// Name of the per-library item manifest. Reserved; files cannot use it.
const MANIFEST_FILE: &str = "manifest.json";

/// Scratch name manifests are written through before the rename. Reserved.
const MANIFEST_TMP_FILE: &str = "manifest.json.tmp";

/// Name of the site fixture at the base path describing lists, field
/// schemas, library paths, and permissions.
const SITE_FILE: &str = "site.json";

/// Remote-side description served by the local backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteManifest {
    #[serde(default)]
    pub lists: Vec<SiteList>,
    #[serde(default)]
    pub libraries: Vec<LibraryDef>,
    #[serde(default)]
    pub permissions: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteList {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// Items of one library directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LibraryManifest {
    next_id: u64,
    items: BTreeMap<String, ManifestItem>,
}

impl Default for LibraryManifest {
    fn default() -> Self {
        LibraryManifest {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestItem {
    id: u64,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

/// Local filesystem document store.
///
/// Library paths map to directories under the base path. The lists, field
/// schemas, and permission grants normally owned by the remote site are
/// read from `site.json` at the base; absent entries default to permissive.
#[derive(Clone)]
pub struct LocalDocumentStore {
    base_path: PathBuf,
    /// Serializes manifest read-modify-write cycles. Upload chains run
    /// concurrently, so unsynchronized updates would lose item entries.
    manifest_lock: Arc<Mutex<()>>,
}

impl LocalDocumentStore {
    /// Create a new LocalDocumentStore rooted at `base_path`.
    pub async fn new(base_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::Config(format!(
                "Failed to create store directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalDocumentStore {
            base_path,
            manifest_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Convert a library path to a filesystem directory, rejecting path
    /// traversal out of the base directory.
    fn library_dir(&self, library_path: &str) -> StoreResult<PathBuf> {
        if library_path.is_empty()
            || library_path.contains("..")
            || library_path.starts_with('/')
        {
            return Err(StoreError::InvalidKey(format!(
                "Invalid library path: {}",
                library_path
            )));
        }
        Ok(self.base_path.join(library_path))
    }

    fn validate_file_name(file_name: &str) -> StoreResult<()> {
        if file_name.is_empty()
            || file_name == MANIFEST_FILE
            || file_name == MANIFEST_TMP_FILE
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(StoreError::InvalidKey(format!(
                "Invalid file name: {}",
                file_name
            )));
        }
        Ok(())
    }

    async fn read_site(&self) -> StoreResult<SiteManifest> {
        let path = self.base_path.join(SITE_FILE);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(SiteManifest::default());
        }
        let raw = fs::read_to_string(&path).await?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Config(format!("Failed to parse {}: {}", SITE_FILE, e)))
    }

    async fn read_manifest(dir: &Path) -> StoreResult<LibraryManifest> {
        let path = dir.join(MANIFEST_FILE);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(LibraryManifest::default());
        }
        let raw = fs::read_to_string(&path).await?;
        serde_json::from_str(&raw).map_err(|e| {
            StoreError::Backend(format!(
                "Failed to parse manifest {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the manifest through a scratch file and rename it into place,
    /// so a concurrent `read_manifest` never sees a partially written file.
    /// Callers must hold `manifest_lock`.
    async fn write_manifest(dir: &Path, manifest: &LibraryManifest) -> StoreResult<()> {
        let path = dir.join(MANIFEST_FILE);
        let tmp = dir.join(MANIFEST_TMP_FILE);
        let raw = serde_json::to_string_pretty(manifest)
            .map_err(|e| StoreError::Backend(format!("Failed to encode manifest: {}", e)))?;
        fs::write(&tmp, raw).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write the site manifest. Intended for provisioning and test setup;
    /// a populated site normally carries its own `site.json`.
    pub async fn write_site_manifest(&self, site: &SiteManifest) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(site)
            .map_err(|e| StoreError::Config(format!("Failed to encode {}: {}", SITE_FILE, e)))?;
        fs::write(self.base_path.join(SITE_FILE), raw).await?;
        Ok(())
    }

    /// Resolve a library title to its path, falling back to the title
    /// itself when the site manifest has no entry.
    fn resolve_library_path(site: &SiteManifest, library_title: &str) -> String {
        site.libraries
            .iter()
            .find(|lib| lib.title == library_title)
            .map(|lib| lib.path.clone())
            .unwrap_or_else(|| library_title.to_string())
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn list_lists(&self) -> StoreResult<Vec<ListInfo>> {
        let site = self.read_site().await?;
        Ok(site
            .lists
            .into_iter()
            .map(|l| ListInfo {
                id: l.id,
                title: l.title,
            })
            .collect())
    }

    async fn list_fields(
        &self,
        list_id: Uuid,
        internal_names: &[String],
    ) -> StoreResult<Vec<FieldSchema>> {
        let site = self.read_site().await?;
        let list = site
            .lists
            .into_iter()
            .find(|l| l.id == list_id)
            .ok_or_else(|| StoreError::NotFound(format!("List {}", list_id)))?;

        Ok(list
            .fields
            .into_iter()
            .filter(|f| internal_names.iter().any(|n| *n == f.internal_name))
            .collect())
    }

    async fn has_add_permission(&self, library_title: &str) -> StoreResult<bool> {
        let site = self.read_site().await?;
        Ok(site
            .permissions
            .get(library_title)
            .copied()
            .unwrap_or(true))
    }

    async fn store_file(
        &self,
        library_path: &str,
        file_name: &str,
        _content_type: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        Self::validate_file_name(file_name)?;
        let dir = self.library_dir(library_path)?;
        let path = dir.join(file_name);
        let size = data.len();
        let start = std::time::Instant::now();

        fs::create_dir_all(&dir).await.map_err(|e| {
            StoreError::StoreFailed(format!(
                "Failed to create library directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        if !overwrite && fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::AlreadyExists(file_name.to_string()));
        }

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StoreError::StoreFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StoreError::StoreFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StoreError::StoreFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        {
            let _guard = self.manifest_lock.lock().await;
            let mut manifest = Self::read_manifest(&dir).await?;
            if !manifest.items.contains_key(file_name) {
                let id = manifest.next_id;
                manifest.next_id += 1;
                manifest.items.insert(
                    file_name.to_string(),
                    ManifestItem {
                        id,
                        fields: BTreeMap::new(),
                    },
                );
            }
            Self::write_manifest(&dir, &manifest).await?;
        }

        tracing::info!(
            library = %library_path,
            file = %file_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store file successful"
        );

        Ok(())
    }

    async fn item_id(&self, library_path: &str, file_name: &str) -> StoreResult<u64> {
        let dir = self.library_dir(library_path)?;
        let manifest = Self::read_manifest(&dir).await?;
        manifest
            .items
            .get(file_name)
            .map(|item| item.id)
            .ok_or_else(|| {
                StoreError::NotFound(format!("{} in library {}", file_name, library_path))
            })
    }

    async fn patch_item(
        &self,
        library_title: &str,
        item_id: u64,
        values: &BTreeMap<String, FieldValue>,
    ) -> StoreResult<()> {
        let site = self.read_site().await?;
        let library_path = Self::resolve_library_path(&site, library_title);
        let dir = self.library_dir(&library_path)?;
        let start = std::time::Instant::now();

        {
            let _guard = self.manifest_lock.lock().await;
            let mut manifest = Self::read_manifest(&dir).await?;
            let item = manifest
                .items
                .values_mut()
                .find(|item| item.id == item_id)
                .ok_or_else(|| {
                    StoreError::NotFound(format!("Item {} in library {}", item_id, library_title))
                })?;

            item.fields
                .extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));

            Self::write_manifest(&dir, &manifest)
                .await
                .map_err(|e| StoreError::PatchFailed(e.to_string()))?;
        }

        tracing::info!(
            library = %library_title,
            item_id,
            field_count = values.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store patch successful"
        );

        Ok(())
    }
}

//! Upload orchestration: the store-then-patch chain per pending file.

use std::collections::BTreeMap;
use std::sync::Arc;

use docdrop_core::models::{ActivityEntry, FieldValue, Library, PendingFile};
use docdrop_store::{DocumentStore, StoreError};
use tokio::task::JoinSet;

use crate::state::FormHandle;

/// Drives the upload workflow against a document store.
///
/// `submit` launches one task per file and lets them converge
/// independently: no ordering is guaranteed between files, failures stay
/// contained to their own file, and nothing is retried. Effects are
/// observed through the evolving form state (per-file outcomes, activity
/// log, uploading flag) rather than a return value.
pub struct Uploader {
    store: Arc<dyn DocumentStore>,
}

impl Uploader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Uploader { store }
    }

    /// Upload each file to the library, then patch its metadata with the
    /// form's current field values.
    ///
    /// Validation (`FormState::is_complete`) is the caller's job; the
    /// orchestrator assumes a selected library and a non-empty batch.
    /// Resubmitting already-settled files runs the chain again and may then
    /// fail with "already exists" — there is no idempotence check here.
    pub async fn submit(&self, handle: &FormHandle, library: &Library, files: Vec<PendingFile>) {
        if files.is_empty() {
            return;
        }

        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let field_values = handle.update(|state| {
            state.begin_upload(&names);
            state.field_values()
        });

        let mut tasks = JoinSet::new();
        for file in files {
            tasks.spawn(upload_one(
                Arc::clone(&self.store),
                handle.clone(),
                library.clone(),
                field_values.clone(),
                file,
            ));
        }

        while tasks.join_next().await.is_some() {}
    }
}

async fn upload_one(
    store: Arc<dyn DocumentStore>,
    handle: FormHandle,
    library: Library,
    values: BTreeMap<String, FieldValue>,
    file: PendingFile,
) {
    let name = file.name;

    match store
        .store_file(&library.path, &name, &file.content_type, file.content, false)
        .await
    {
        Ok(()) => {
            handle.update(|state| {
                state.push_entry(ActivityEntry::success(
                    &name,
                    format!("Successfully uploaded {}.", name),
                ));
            });
        }
        Err(StoreError::AlreadyExists(_)) => {
            handle.update(|state| {
                state.push_entry(ActivityEntry::error(
                    &name,
                    format!("Error uploading {}. The file already exists.", name),
                ));
                state.set_outcome(&name, false);
            });
            return;
        }
        Err(err) => {
            tracing::warn!(file = %name, library = %library.title, error = %err, "Store step failed");
            handle.update(|state| {
                state.push_entry(ActivityEntry::error(
                    &name,
                    format!("Error uploading {}.", name),
                ));
                state.set_outcome(&name, false);
            });
            return;
        }
    }

    let item_id = match store.item_id(&library.path, &name).await {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(file = %name, library = %library.title, error = %err, "Item lookup failed");
            settle_patch_failure(&handle, &name);
            return;
        }
    };

    match store.patch_item(&library.title, item_id, &values).await {
        Ok(()) => {
            handle.update(|state| {
                state.push_entry(ActivityEntry::success(
                    &name,
                    format!("Successfully updated metadata for file {}.", name),
                ));
                state.set_outcome(&name, true);
            });
        }
        Err(err) => {
            tracing::warn!(file = %name, library = %library.title, error = %err, "Metadata patch failed");
            settle_patch_failure(&handle, &name);
        }
    }
}

// The stored bytes stay in place on patch failure; there is no rollback.
fn settle_patch_failure(handle: &FormHandle, name: &str) {
    handle.update(|state| {
        state.push_entry(ActivityEntry::error(
            name,
            format!("Error updating metadata for file {}.", name),
        ));
        state.set_outcome(name, false);
    });
}

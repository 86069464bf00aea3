//! Form bootstrap: fetch the configured field schemas and resolve the
//! selectable libraries before the form is usable.

use std::sync::Arc;

use anyhow::{Context, Result};
use docdrop_core::config::UploadConfig;
use docdrop_core::models::Field;
use docdrop_store::DocumentStore;

use crate::permissions::resolve_libraries;
use crate::state::{FormHandle, FormState};

/// Build a ready form: field schemas loaded and cross-referenced with the
/// configured definitions, candidate libraries filtered through permission
/// probes.
pub async fn bootstrap_form(
    store: Arc<dyn DocumentStore>,
    config: &UploadConfig,
) -> Result<FormHandle> {
    let fields = load_fields(&store, config).await?;
    let handle = FormHandle::new(FormState::new(fields));

    resolve_libraries(Arc::clone(&store), &config.libraries, &handle).await;

    Ok(handle)
}

/// Fetch the schemas of the configured fields from the configured list.
/// No list configured means a file-only form with no metadata fields.
async fn load_fields(store: &Arc<dyn DocumentStore>, config: &UploadConfig) -> Result<Vec<Field>> {
    let Some(list_id) = config.list_id else {
        return Ok(Vec::new());
    };

    let lists = store.list_lists().await.context("Failed to enumerate lists")?;
    if !lists.iter().any(|l| l.id == list_id) {
        tracing::warn!(%list_id, "Configured list not found on site");
    }

    let names = config.ordered_field_names();
    let schemas = store
        .list_fields(list_id, &names)
        .await
        .context("Failed to fetch field schemas")?;

    let mut defs: Vec<_> = config.fields.iter().collect();
    defs.sort_by_key(|d| d.sort_order);

    let mut fields = Vec::with_capacity(defs.len());
    for def in defs {
        match schemas
            .iter()
            .find(|s| s.internal_name == def.internal_name)
        {
            Some(schema) => fields.push(Field::new(schema.clone(), def.sort_order)),
            None => {
                tracing::warn!(
                    field = %def.internal_name,
                    "Configured field missing from list schema"
                );
            }
        }
    }

    Ok(fields)
}

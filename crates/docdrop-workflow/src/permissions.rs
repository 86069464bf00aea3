//! Library permission resolution.
//!
//! Each configured candidate library is probed independently for add
//! permission; the selectable set grows as grants settle, in whatever
//! order the probes complete.

use std::sync::Arc;

use docdrop_core::config::LibraryDef;
use docdrop_core::models::Library;
use docdrop_store::DocumentStore;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::state::FormHandle;

/// Probe every candidate concurrently and append each granted library to
/// the form's selectable set as soon as its probe settles. Denied or
/// failed probes omit the library silently. Returns the converged set.
pub async fn resolve_libraries(
    store: Arc<dyn DocumentStore>,
    candidates: &[LibraryDef],
    handle: &FormHandle,
) -> Vec<Library> {
    let mut probes: FuturesUnordered<_> = candidates
        .iter()
        .cloned()
        .map(|candidate| {
            let store = Arc::clone(&store);
            async move {
                match store.has_add_permission(&candidate.title).await {
                    Ok(true) => Some(Library::new(candidate.title, candidate.path)),
                    Ok(false) => {
                        tracing::debug!(library = %candidate.title, "Add permission not granted");
                        None
                    }
                    Err(err) => {
                        tracing::debug!(
                            library = %candidate.title,
                            error = %err,
                            "Permission probe failed"
                        );
                        None
                    }
                }
            }
        })
        .collect();

    while let Some(probe) = probes.next().await {
        if let Some(library) = probe {
            handle.update(|state| state.add_library(library));
        }
    }

    handle.snapshot().libraries
}

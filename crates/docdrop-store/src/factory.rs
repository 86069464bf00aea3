#[cfg(feature = "store-local")]
use crate::LocalDocumentStore;
#[cfg(feature = "store-rest")]
use crate::RestDocumentStore;
use crate::{DocumentStore, StoreResult};
use docdrop_core::config::StoreConfig;
use std::sync::Arc;

/// Create a document store backend based on configuration
pub async fn create_store(config: &StoreConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    match config {
        #[cfg(feature = "store-local")]
        StoreConfig::Local { base_path } => {
            let store = LocalDocumentStore::new(base_path.clone()).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-local"))]
        StoreConfig::Local { .. } => Err(crate::StoreError::Config(
            "Local store backend not available (store-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "store-rest")]
        StoreConfig::Rest { base_url, api_key } => {
            let store = RestDocumentStore::new(base_url.clone(), api_key.clone())?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "store-rest"))]
        StoreConfig::Rest { .. } => Err(crate::StoreError::Config(
            "REST store backend not available (store-rest feature not enabled)".to_string(),
        )),
    }
}

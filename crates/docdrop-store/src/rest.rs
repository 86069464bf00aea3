use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use docdrop_core::models::{FieldSchema, FieldValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::traits::{DocumentStore, ListInfo, StoreError, StoreResult};

/// REST document store client.
///
/// Talks to a remote list API rooted at `base_url`. Conflict responses on
/// file placement map to `AlreadyExists`; 403 on the permission probe is a
/// plain "not granted" rather than an error.
#[derive(Clone)]
pub struct RestDocumentStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PermissionResponse {
    granted: bool,
}

#[derive(Debug, Deserialize)]
struct ItemResponse {
    id: u64,
}

impl RestDocumentStore {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> StoreResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(RestDocumentStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn expect_success(response: Response, what: &str) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Backend(format!(
            "{} failed with status {}: {}",
            what, status, body
        )))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn list_lists(&self) -> StoreResult<Vec<ListInfo>> {
        let response = self
            .authorize(self.client.get(self.url("lists")))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let response = Self::expect_success(response, "List enumeration").await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("Invalid list response: {}", e)))
    }

    async fn list_fields(
        &self,
        list_id: Uuid,
        internal_names: &[String],
    ) -> StoreResult<Vec<FieldSchema>> {
        let response = self
            .authorize(
                self.client
                    .get(self.url(&format!("lists/{}/fields", list_id)))
                    .query(&[("names", internal_names.join(","))]),
            )
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("List {}", list_id)));
        }
        let response = Self::expect_success(response, "Field lookup").await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("Invalid field response: {}", e)))
    }

    async fn has_add_permission(&self, library_title: &str) -> StoreResult<bool> {
        let response = self
            .authorize(self.client.get(self.url(&format!(
                "libraries/{}/permissions/add",
                urlencoding::encode(library_title)
            ))))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::FORBIDDEN {
            return Ok(false);
        }
        let response = Self::expect_success(response, "Permission probe").await?;
        let permission: PermissionResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("Invalid permission response: {}", e)))?;
        Ok(permission.granted)
    }

    async fn store_file(
        &self,
        library_path: &str,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        let response = self
            .authorize(
                self.client
                    .put(self.url(&format!(
                        "libraries/{}/files/{}",
                        urlencoding::encode(library_path),
                        urlencoding::encode(file_name)
                    )))
                    .query(&[("overwrite", overwrite)])
                    .header("Content-Type", content_type)
                    .body(data),
            )
            .send()
            .await
            .map_err(|e| StoreError::StoreFailed(e.to_string()))?;

        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::AlreadyExists(file_name.to_string())),
            StatusCode::FORBIDDEN => {
                Err(StoreError::PermissionDenied(library_path.to_string()))
            }
            status if status.is_success() => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::StoreFailed(format!(
                    "Store failed with status {}: {}",
                    status, body
                )))
            }
        }
    }

    async fn item_id(&self, library_path: &str, file_name: &str) -> StoreResult<u64> {
        let response = self
            .authorize(self.client.get(self.url(&format!(
                "libraries/{}/files/{}/item",
                urlencoding::encode(library_path),
                urlencoding::encode(file_name)
            ))))
            .send()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!(
                "{} in library {}",
                file_name, library_path
            )));
        }
        let response = Self::expect_success(response, "Item lookup").await?;
        let item: ItemResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("Invalid item response: {}", e)))?;
        Ok(item.id)
    }

    async fn patch_item(
        &self,
        library_title: &str,
        item_id: u64,
        values: &BTreeMap<String, FieldValue>,
    ) -> StoreResult<()> {
        let response = self
            .authorize(
                self.client
                    .patch(self.url(&format!(
                        "lists/{}/items/{}",
                        urlencoding::encode(library_title),
                        item_id
                    )))
                    .json(values),
            )
            .send()
            .await
            .map_err(|e| StoreError::PatchFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(format!(
                "Item {} in library {}",
                item_id, library_title
            ))),
            status if status.is_success() => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::PatchFailed(format!(
                    "Patch failed with status {}: {}",
                    status, body
                )))
            }
        }
    }
}

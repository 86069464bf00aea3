use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A file waiting to be uploaded, plus its terminal outcome once the
/// store-then-patch chain for it has settled.
///
/// `outcome` is `None` while the file is pending or in flight, `Some(true)`
/// only when both the store and the metadata patch succeeded, and
/// `Some(false)` on any failure.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub content: Bytes,
    pub last_modified: DateTime<Utc>,
    pub outcome: Option<bool>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: Bytes) -> Self {
        PendingFile {
            name: name.into(),
            size_bytes: content.len() as u64,
            content_type: content_type.into(),
            content,
            last_modified: Utc::now(),
            outcome: None,
        }
    }

    /// Whether the upload chain for this file has reached a terminal outcome.
    pub fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Success,
    Error,
}

/// One entry of the append-only activity log shown to the user while
/// uploads settle. Entries are ordered by emission time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    pub level: ActivityLevel,
    pub related_file: String,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn success(related_file: impl Into<String>, message: impl Into<String>) -> Self {
        ActivityEntry {
            message: message.into(),
            level: ActivityLevel::Success,
            related_file: related_file.into(),
            at: Utc::now(),
        }
    }

    pub fn error(related_file: impl Into<String>, message: impl Into<String>) -> Self {
        ActivityEntry {
            message: message.into(),
            level: ActivityLevel::Error,
            related_file: related_file.into(),
            at: Utc::now(),
        }
    }
}

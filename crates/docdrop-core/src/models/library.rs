use serde::{Deserialize, Serialize};

/// A destination document library the current user may upload into.
///
/// The selectable set is built once per session by probing each configured
/// candidate for add permission; it is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub title: String,
    pub path: String,
}

impl Library {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Library {
            title: title.into(),
            path: path.into(),
        }
    }
}

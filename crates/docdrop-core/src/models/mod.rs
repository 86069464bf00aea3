pub mod activity;
pub mod field;
pub mod file;
pub mod library;

pub use activity::{ActivityEntry, ActivityLevel};
pub use field::{Field, FieldKind, FieldSchema, FieldValue};
pub use file::PendingFile;
pub use library::Library;

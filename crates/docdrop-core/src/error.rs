//! Error types for form state and user input.
//!
//! Store-side errors live in the docdrop-store crate as `StoreError`;
//! this module covers everything the form itself can reject before a
//! single byte is sent to the store.

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Type mismatch for field {field}: expected {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Field {0} has an unsupported type and cannot hold a value")]
    UnsupportedField(String),

    #[error("Duplicate file name: {0}")]
    DuplicateFile(String),

    #[error("Unknown library: {0}")]
    UnknownLibrary(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

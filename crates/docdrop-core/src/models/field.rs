use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The remote type tag of a metadata field, as reported by the list schema.
///
/// Unknown tags are preserved as `Unsupported` rather than rejected so a
/// misconfigured field degrades to a visible placeholder instead of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Note,
    Number,
    Currency,
    DateTime,
    Choice,
    MultiChoice,
    Boolean,
    Url,
    Unsupported(String),
}

impl FieldKind {
    /// Parse the type string used by the remote schema.
    pub fn parse(tag: &str) -> FieldKind {
        match tag {
            "Text" => FieldKind::Text,
            "Note" => FieldKind::Note,
            "Number" => FieldKind::Number,
            "Currency" => FieldKind::Currency,
            "DateTime" => FieldKind::DateTime,
            "Choice" => FieldKind::Choice,
            "MultiChoice" => FieldKind::MultiChoice,
            "Boolean" => FieldKind::Boolean,
            "URL" => FieldKind::Url,
            other => FieldKind::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Note => "Note",
            FieldKind::Number => "Number",
            FieldKind::Currency => "Currency",
            FieldKind::DateTime => "DateTime",
            FieldKind::Choice => "Choice",
            FieldKind::MultiChoice => "MultiChoice",
            FieldKind::Boolean => "Boolean",
            FieldKind::Url => "URL",
            FieldKind::Unsupported(tag) => tag,
        }
    }

    /// Name of the value variant this kind accepts, for error reporting.
    fn expected_variant(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Note => "Text",
            FieldKind::Number | FieldKind::Currency => "Number",
            FieldKind::DateTime => "Date",
            FieldKind::Choice => "Choice",
            FieldKind::MultiChoice => "MultiChoice",
            FieldKind::Boolean => "Bool",
            FieldKind::Url => "Url",
            FieldKind::Unsupported(_) => "none",
        }
    }
}

/// A typed field value. The variant must match the field's kind; mismatches
/// are rejected at assignment instead of being carried as untyped data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Bool(bool),
    Choice(String),
    MultiChoice(Vec<String>),
    Url { url: String, description: String },
}

impl FieldValue {
    pub fn variant_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "Text",
            FieldValue::Number(_) => "Number",
            FieldValue::Date(_) => "Date",
            FieldValue::Bool(_) => "Bool",
            FieldValue::Choice(_) => "Choice",
            FieldValue::MultiChoice(_) => "MultiChoice",
            FieldValue::Url { .. } => "Url",
        }
    }

    /// Whether this value counts as empty for form completeness.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.trim().is_empty(),
            FieldValue::MultiChoice(keys) => keys.is_empty(),
            FieldValue::Url { url, .. } => url.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Date(_) | FieldValue::Bool(_) => false,
        }
    }

    fn matches(&self, kind: &FieldKind) -> bool {
        matches!(
            (kind, self),
            (FieldKind::Text | FieldKind::Note, FieldValue::Text(_))
                | (FieldKind::Number | FieldKind::Currency, FieldValue::Number(_))
                | (FieldKind::DateTime, FieldValue::Date(_))
                | (FieldKind::Choice, FieldValue::Choice(_))
                | (FieldKind::MultiChoice, FieldValue::MultiChoice(_))
                | (FieldKind::Boolean, FieldValue::Bool(_))
                | (FieldKind::Url, FieldValue::Url { .. })
        )
    }
}

/// A metadata field definition as returned by the remote list schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub internal_name: String,
    pub title: String,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_fill_in: Option<bool>,
}

/// A form field: remote schema plus the configured ordering and the value
/// the user has entered so far.
#[derive(Debug, Clone)]
pub struct Field {
    pub schema: FieldSchema,
    pub sort_order: i32,
    pub value: Option<FieldValue>,
}

impl Field {
    pub fn new(schema: FieldSchema, sort_order: i32) -> Self {
        Field {
            schema,
            sort_order,
            value: None,
        }
    }

    pub fn internal_name(&self) -> &str {
        &self.schema.internal_name
    }

    /// Assign a value, rejecting variants that do not match the field kind.
    pub fn assign(&mut self, value: FieldValue) -> Result<(), FormError> {
        if matches!(self.schema.kind, FieldKind::Unsupported(_)) {
            return Err(FormError::UnsupportedField(
                self.schema.internal_name.clone(),
            ));
        }
        if !value.matches(&self.schema.kind) {
            return Err(FormError::TypeMismatch {
                field: self.schema.internal_name.clone(),
                expected: self.schema.kind.expected_variant(),
                got: value.variant_name(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// True when the field holds a non-empty value.
    pub fn is_filled(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_empty())
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

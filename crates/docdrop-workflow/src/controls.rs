//! Field-kind to form-control mapping.
//!
//! A pure policy table: given a field schema, which control should a host
//! UI render for it. Unrecognized kinds map to a visible placeholder
//! instead of failing.

use docdrop_core::models::{FieldKind, FieldSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Single-line text input (also used for numeric kinds' raw entry).
    TextBox,
    /// Multi-line text input.
    TextArea,
    NumberBox,
    DatePicker,
    ChoiceDropdown {
        options: Vec<String>,
        /// Whether a free-text fallback input accompanies the dropdown.
        fill_in: bool,
    },
    MultiChoiceDropdown {
        options: Vec<String>,
        fill_in: bool,
    },
    Toggle,
    /// Two-part URL + description input pair.
    UrlPair,
    /// Placeholder naming the unrecognized type tag.
    Unsupported { type_tag: String },
}

pub fn control_for(schema: &FieldSchema) -> Control {
    let options = || schema.choices.clone().unwrap_or_default();
    let fill_in = schema.allow_fill_in.unwrap_or(false);

    match &schema.kind {
        FieldKind::Text => Control::TextBox,
        FieldKind::Note => Control::TextArea,
        FieldKind::Number | FieldKind::Currency => Control::NumberBox,
        FieldKind::DateTime => Control::DatePicker,
        FieldKind::Choice => Control::ChoiceDropdown {
            options: options(),
            fill_in,
        },
        FieldKind::MultiChoice => Control::MultiChoiceDropdown {
            options: options(),
            fill_in,
        },
        FieldKind::Boolean => Control::Toggle,
        FieldKind::Url => Control::UrlPair,
        FieldKind::Unsupported(tag) => Control::Unsupported {
            type_tag: tag.clone(),
        },
    }
}

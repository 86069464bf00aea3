use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use docdrop_core::models::{FieldKind, FieldValue};

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Guess a content type from the file extension. Unknown extensions fall
/// back to application/octet-stream.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Parse a command-line value string into the typed value a field of the
/// given kind accepts.
///
/// Formats: numbers as decimal, dates as RFC 3339, booleans as
/// true/false/yes/no/1/0, multi-choice as comma-separated keys, URLs as
/// `url|description` (description optional).
pub fn parse_field_value(kind: &FieldKind, raw: &str) -> Result<FieldValue> {
    match kind {
        FieldKind::Text | FieldKind::Note => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Number | FieldKind::Currency => {
            let number: f64 = raw
                .parse()
                .with_context(|| format!("Invalid number: {}", raw))?;
            Ok(FieldValue::Number(number))
        }
        FieldKind::DateTime => {
            let date: DateTime<Utc> = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("Invalid RFC 3339 date: {}", raw))?
                .with_timezone(&Utc);
            Ok(FieldValue::Date(date))
        }
        FieldKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(FieldValue::Bool(true)),
            "false" | "no" | "0" => Ok(FieldValue::Bool(false)),
            _ => bail!("Invalid boolean: {}", raw),
        },
        FieldKind::Choice => Ok(FieldValue::Choice(raw.to_string())),
        FieldKind::MultiChoice => Ok(FieldValue::MultiChoice(
            raw.split(',')
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
                .collect(),
        )),
        FieldKind::Url => {
            let (url, description) = raw.split_once('|').unwrap_or((raw, ""));
            Ok(FieldValue::Url {
                url: url.to_string(),
                description: description.to_string(),
            })
        }
        FieldKind::Unsupported(tag) => bail!("Field type {} is not supported", tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_known_extensions() {
        assert_eq!(content_type_for("report.PDF"), "application/pdf");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
    }

    #[test]
    fn test_content_type_fallback() {
        assert_eq!(content_type_for("archive.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_parse_text() {
        let value = parse_field_value(&FieldKind::Text, "hello").unwrap();
        assert_eq!(value, FieldValue::Text("hello".to_string()));
    }

    #[test]
    fn test_parse_number() {
        let value = parse_field_value(&FieldKind::Currency, "12.50").unwrap();
        assert_eq!(value, FieldValue::Number(12.5));
        assert!(parse_field_value(&FieldKind::Number, "not-a-number").is_err());
    }

    #[test]
    fn test_parse_date() {
        let value = parse_field_value(&FieldKind::DateTime, "2024-03-01T12:00:00Z").unwrap();
        assert!(matches!(value, FieldValue::Date(_)));
        assert!(parse_field_value(&FieldKind::DateTime, "March 1st").is_err());
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(
            parse_field_value(&FieldKind::Boolean, "Yes").unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            parse_field_value(&FieldKind::Boolean, "0").unwrap(),
            FieldValue::Bool(false)
        );
        assert!(parse_field_value(&FieldKind::Boolean, "maybe").is_err());
    }

    #[test]
    fn test_parse_multi_choice() {
        let value = parse_field_value(&FieldKind::MultiChoice, "Red, Blue ,").unwrap();
        assert_eq!(
            value,
            FieldValue::MultiChoice(vec!["Red".to_string(), "Blue".to_string()])
        );
    }

    #[test]
    fn test_parse_url_with_description() {
        let value =
            parse_field_value(&FieldKind::Url, "https://example.test|Example site").unwrap();
        assert_eq!(
            value,
            FieldValue::Url {
                url: "https://example.test".to_string(),
                description: "Example site".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unsupported_rejected() {
        let kind = FieldKind::Unsupported("Lookup".to_string());
        assert!(parse_field_value(&kind, "anything").is_err());
    }
}

//! Configuration module
//!
//! The upload form is driven entirely by host configuration: the site URL,
//! the list whose schema supplies the metadata fields, the ordered field
//! definitions, and the candidate destination libraries. Configuration is
//! read from a JSON file pointed to by `DOCDROP_CONFIG`, with environment
//! overrides for scalar settings.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FormError;

const CONFIG_PATH_VAR: &str = "DOCDROP_CONFIG";
const SITE_URL_VAR: &str = "DOCDROP_SITE_URL";
const STORE_PATH_VAR: &str = "DOCDROP_STORE_PATH";

/// A configured metadata field: the internal name to cross-reference against
/// the remote schema, and the position it takes in the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub internal_name: String,
    #[serde(default)]
    pub sort_order: i32,
}

/// A candidate destination library. Candidates are filtered through a
/// permission probe before becoming selectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDef {
    pub title: String,
    pub path: String,
}

/// Document store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    Local {
        base_path: PathBuf,
    },
    Rest {
        base_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub site_url: String,
    #[serde(default)]
    pub list_id: Option<Uuid>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub libraries: Vec<LibraryDef>,
    pub store: StoreConfig,
}

impl UploadConfig {
    /// Load configuration from the file named by `DOCDROP_CONFIG`, applying
    /// environment overrides. `.env` files are honored best-effort.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = env::var(CONFIG_PATH_VAR)
            .with_context(|| format!("{} not set", CONFIG_PATH_VAR))?;
        let mut config = Self::from_file(&path)?;

        if let Ok(site_url) = env::var(SITE_URL_VAR) {
            config.site_url = site_url;
        }
        if let Ok(store_path) = env::var(STORE_PATH_VAR) {
            if let StoreConfig::Local { base_path } = &mut config.store {
                *base_path = PathBuf::from(store_path);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file without applying env overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UploadConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.site_url.trim().is_empty() {
            return Err(FormError::InvalidConfig("site_url is empty".to_string()));
        }
        if self.libraries.is_empty() {
            return Err(FormError::InvalidConfig(
                "no candidate libraries configured".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.internal_name.as_str()) {
                return Err(FormError::InvalidConfig(format!(
                    "duplicate field definition: {}",
                    field.internal_name
                )));
            }
        }
        Ok(())
    }

    /// Configured internal field names, sorted by their form position.
    pub fn ordered_field_names(&self) -> Vec<String> {
        let mut defs: Vec<&FieldDef> = self.fields.iter().collect();
        defs.sort_by_key(|d| d.sort_order);
        defs.iter().map(|d| d.internal_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_config() -> UploadConfig {
        UploadConfig {
            site_url: "https://example.test/site".to_string(),
            list_id: Some(Uuid::new_v4()),
            fields: vec![
                FieldDef {
                    internal_name: "Category".to_string(),
                    sort_order: 2,
                },
                FieldDef {
                    internal_name: "Title".to_string(),
                    sort_order: 1,
                },
            ],
            libraries: vec![LibraryDef {
                title: "Shared Documents".to_string(),
                path: "shared-documents".to_string(),
            }],
            store: StoreConfig::Local {
                base_path: PathBuf::from("/tmp/docdrop"),
            },
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_libraries() {
        let mut config = sample_config();
        config.libraries.clear();
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let mut config = sample_config();
        config.fields.push(FieldDef {
            internal_name: "Title".to_string(),
            sort_order: 3,
        });
        assert!(matches!(
            config.validate(),
            Err(FormError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ordered_field_names() {
        let config = sample_config();
        assert_eq!(config.ordered_field_names(), vec!["Title", "Category"]);
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = sample_config();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = UploadConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.site_url, config.site_url);
        assert_eq!(loaded.fields.len(), 2);
        assert_eq!(loaded.libraries[0].title, "Shared Documents");
        assert!(matches!(loaded.store, StoreConfig::Local { .. }));
    }
}

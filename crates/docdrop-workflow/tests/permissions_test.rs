mod helpers;

use std::collections::BTreeMap;
use std::sync::Arc;

use docdrop_core::config::{FieldDef, LibraryDef, StoreConfig, UploadConfig};
use docdrop_workflow::{bootstrap_form, resolve_libraries, FormHandle};
use helpers::{setup_site, setup_site_with_permissions, FaultyStore};

fn candidates() -> Vec<LibraryDef> {
    vec![
        LibraryDef {
            title: "Shared Documents".to_string(),
            path: "shared".to_string(),
        },
        LibraryDef {
            title: "Archive".to_string(),
            path: "archive".to_string(),
        },
    ]
}

#[tokio::test]
async fn test_denied_library_omitted() {
    let mut permissions = BTreeMap::new();
    permissions.insert("Shared Documents".to_string(), true);
    permissions.insert("Archive".to_string(), false);
    let site = setup_site_with_permissions(permissions).await;

    let handle = FormHandle::default();
    let resolved = resolve_libraries(site.store.clone(), &candidates(), &handle).await;

    let titles: Vec<&str> = resolved.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Shared Documents"]);

    // The converged set is also what the form observes.
    assert_eq!(handle.snapshot().libraries, resolved);
}

#[tokio::test]
async fn test_failed_probe_omitted() {
    let site = setup_site().await;
    let store = Arc::new(FaultyStore {
        fail_probe_titles: vec!["Archive".to_string()],
        ..FaultyStore::wrap(site.store.clone())
    });

    let handle = FormHandle::default();
    let resolved = resolve_libraries(store, &candidates(), &handle).await;

    let titles: Vec<&str> = resolved.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Shared Documents"]);
}

#[tokio::test]
async fn test_all_granted_by_default() {
    let site = setup_site().await;

    let handle = FormHandle::default();
    let resolved = resolve_libraries(site.store.clone(), &candidates(), &handle).await;

    assert_eq!(resolved.len(), 2);
}

#[tokio::test]
async fn test_bootstrap_builds_ordered_fields_and_libraries() {
    let site = setup_site().await;

    let config = UploadConfig {
        site_url: "https://example.test/site".to_string(),
        list_id: Some(site.list_id),
        fields: vec![
            FieldDef {
                internal_name: "Category".to_string(),
                sort_order: 2,
            },
            FieldDef {
                internal_name: "Title".to_string(),
                sort_order: 1,
            },
            // Not present in the list schema; skipped with a warning.
            FieldDef {
                internal_name: "Missing".to_string(),
                sort_order: 3,
            },
        ],
        libraries: candidates(),
        store: StoreConfig::Local {
            base_path: site.dir.path().to_path_buf(),
        },
    };

    let handle = bootstrap_form(site.store.clone(), &config).await.unwrap();
    let state = handle.snapshot();

    let names: Vec<&str> = state.fields.iter().map(|f| f.internal_name()).collect();
    assert_eq!(names, vec!["Title", "Category"]);
    assert_eq!(state.libraries.len(), 2);
    assert!(!state.is_complete());
}

#[tokio::test]
async fn test_bootstrap_without_list_has_no_fields() {
    let site = setup_site().await;

    let config = UploadConfig {
        site_url: "https://example.test/site".to_string(),
        list_id: None,
        fields: vec![],
        libraries: candidates(),
        store: StoreConfig::Local {
            base_path: site.dir.path().to_path_buf(),
        },
    };

    let handle = bootstrap_form(site.store.clone(), &config).await.unwrap();
    let state = handle.snapshot();
    assert!(state.fields.is_empty());
    assert_eq!(state.libraries.len(), 2);
}

//! Explicit form state and its serialized-access handle.
//!
//! The upload form's mutable state lives in one struct instead of ambient
//! component fields. Per-file upload tasks settle concurrently; every
//! mutation goes through `FormHandle::update`, a read-modify-write over the
//! latest state, so no settle can clobber another's outcome.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use docdrop_core::error::FormError;
use docdrop_core::models::{ActivityEntry, Field, FieldValue, Library, PendingFile};

#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Configured metadata fields, ordered by their form position.
    pub fields: Vec<Field>,
    /// Libraries the current principal may upload into. Append-only while
    /// permission probes settle; immutable afterwards.
    pub libraries: Vec<Library>,
    pub selected_library: Option<Library>,
    pub pending: Vec<PendingFile>,
    pub log: Vec<ActivityEntry>,
    pub uploading: bool,
}

impl FormState {
    pub fn new(mut fields: Vec<Field>) -> Self {
        fields.sort_by_key(|f| f.sort_order);
        FormState {
            fields,
            ..Default::default()
        }
    }

    /// Set the value of the field with the given internal name. Rejects
    /// unknown names and values whose variant does not match the field kind.
    pub fn set_field_value(
        &mut self,
        internal_name: &str,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.internal_name() == internal_name)
            .ok_or_else(|| FormError::UnknownField(internal_name.to_string()))?;
        field.assign(value)
    }

    /// Select a library from the selectable set by title.
    pub fn select_library(&mut self, title: &str) -> Result<(), FormError> {
        let library = self
            .libraries
            .iter()
            .find(|l| l.title == title)
            .cloned()
            .ok_or_else(|| FormError::UnknownLibrary(title.to_string()))?;
        self.selected_library = Some(library);
        Ok(())
    }

    /// Append a library to the selectable set. Duplicate titles are ignored
    /// so a repeated probe cannot double-list a library.
    pub fn add_library(&mut self, library: Library) {
        if !self.libraries.iter().any(|l| l.title == library.title) {
            self.libraries.push(library);
        }
    }

    /// Replace the pending file set. Duplicate names are rejected up front;
    /// the store would reject the second copy at upload time anyway.
    pub fn set_files(&mut self, files: Vec<PendingFile>) -> Result<(), FormError> {
        let mut seen = std::collections::HashSet::new();
        for file in &files {
            if !seen.insert(file.name.as_str()) {
                return Err(FormError::DuplicateFile(file.name.clone()));
            }
        }
        self.pending = files;
        Ok(())
    }

    /// The single gating predicate for enabling submission: every field
    /// filled, a library selected, at least one pending file.
    pub fn is_complete(&self) -> bool {
        !self.pending.is_empty()
            && self.selected_library.is_some()
            && self.fields.iter().all(|f| f.is_filled())
    }

    /// Clear field values, pending files, and the activity log. The field
    /// schema, the selectable libraries, and the current selection stay.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.pending.clear();
        self.log.clear();
        self.uploading = false;
    }

    /// Current values of all filled fields, keyed by internal name.
    pub fn field_values(&self) -> BTreeMap<String, FieldValue> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.value
                    .as_ref()
                    .map(|v| (f.internal_name().to_string(), v.clone()))
            })
            .collect()
    }

    pub fn push_entry(&mut self, entry: ActivityEntry) {
        self.log.push(entry);
    }

    /// Mark a submission as started: the named files go back in flight and
    /// the uploading flag turns on until every one of them settles.
    pub fn begin_upload(&mut self, names: &[String]) {
        for file in &mut self.pending {
            if names.iter().any(|n| *n == file.name) {
                file.outcome = None;
            }
        }
        self.uploading = true;
    }

    /// Record a file's terminal outcome and recompute the uploading flag
    /// from the latest pending set.
    pub fn set_outcome(&mut self, file_name: &str, outcome: bool) {
        if let Some(file) = self.pending.iter_mut().find(|f| f.name == file_name) {
            file.outcome = Some(outcome);
        }
        self.uploading = self.pending.iter().any(|f| !f.is_settled());
    }
}

/// Shared handle to the form state. Snapshots are cheap clones for
/// rendering; mutations run serialized under the lock.
#[derive(Clone, Default)]
pub struct FormHandle {
    inner: Arc<Mutex<FormState>>,
}

impl FormHandle {
    pub fn new(state: FormState) -> Self {
        FormHandle {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> FormState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

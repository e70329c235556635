use crate::discovery::{FileIndex, LabelFile};
use crate::error::LabelError;
use crate::parser::{LabelReader, RawLabel};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::sync::Arc;
use tracing::{debug, warn};

use super::entry::{LabelEntry, LabelKey};

/// Filters for a merge session query.
///
/// At least one of the four selector fields must be non-empty; a fully
/// unparameterized query is refused outright rather than scanning every
/// resource file into memory. `key` and `locale` do not narrow which files
/// are parsed — they bound the query and direct what callers look up in the
/// populated index afterwards.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    pub component: Option<String>,
    pub file_name: Option<String>,
    pub key: Option<String>,
    pub locale: Option<String>,
    pub only_unused: bool,
}

impl QueryFilter {
    pub fn is_unbounded(&self) -> bool {
        non_empty(&self.component).is_none()
            && non_empty(&self.file_name).is_none()
            && non_empty(&self.key).is_none()
            && non_empty(&self.locale).is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// One query's private view of the label corpus: the merged entry map, the
/// set of locales observed, and the labels that collided on a locale.
///
/// Sessions share the read-only [`FileIndex`] and own everything else
/// exclusively; create one per query.
pub struct MergeSession {
    files: Arc<FileIndex>,
    labels: BTreeMap<LabelKey, LabelEntry>,
    locales_found: BTreeSet<String>,
    /// One append per conflicting locale write; a label can appear repeatedly
    duplicated: Vec<LabelKey>,
}

impl MergeSession {
    pub fn new(files: Arc<FileIndex>) -> Self {
        Self {
            files,
            labels: BTreeMap::new(),
            locales_found: BTreeSet::new(),
            duplicated: Vec::new(),
        }
    }

    /// Parse every file selected by the filter and fold its labels into the
    /// session index. Entries sharing (key, file) merge; a repeated locale
    /// with different text is recorded as a conflict and the first-seen
    /// value is kept.
    pub fn query(&mut self, filter: &QueryFilter) -> Result<(), LabelError> {
        if filter.is_unbounded() {
            // An unparameterized query would load the entire label corpus
            warn!("refusing unparameterized label query");
            return Ok(());
        }

        let files = Arc::clone(&self.files);
        for file in files.files().values() {
            if let Some(component) = non_empty(&filter.component) {
                if component != file.component {
                    continue;
                }
            }
            if let Some(file_name) = non_empty(&filter.file_name) {
                if file_name != file.file_name {
                    continue;
                }
            }
            debug!("Current file: {}", file.file_name);

            let contents = fs::read_to_string(&file.path).map_err(|source| LabelError::Io {
                path: file.path.clone(),
                source,
            })?;
            for raw in LabelReader::new(&file.file_name, &contents, filter.only_unused) {
                self.merge(&file.file_name, raw?)?;
            }
        }
        Ok(())
    }

    fn merge(&mut self, file_name: &str, raw: RawLabel) -> Result<(), LabelError> {
        for value in &raw.values {
            let label_key = LabelKey::new(&raw.key, file_name);
            match self.labels.get_mut(&label_key) {
                None => {
                    let entry = LabelEntry::new(
                        &raw.key,
                        &raw.key_comment,
                        file_name,
                        &value.locale,
                        &value.value,
                        &value.comment,
                    )?;
                    self.labels.insert(label_key, entry);
                }
                Some(entry) => {
                    if entry.set_value(&value.locale, &value.value, &value.comment, false) {
                        self.duplicated.push(label_key);
                    }
                }
            }
            self.locales_found.insert(value.locale.clone());
        }
        Ok(())
    }

    /// Look up a discovered resource file by name
    pub fn label_file(&self, file_name: &str) -> Option<&LabelFile> {
        self.files.get(file_name)
    }

    /// The shared file index this session reads from
    pub fn file_index(&self) -> &FileIndex {
        &self.files
    }

    /// The merged entries, sorted by composite identity
    pub fn labels(&self) -> &BTreeMap<LabelKey, LabelEntry> {
        &self.labels
    }

    pub fn label_keys(&self) -> impl Iterator<Item = &LabelKey> {
        self.labels.keys()
    }

    /// Every locale observed across the parsed files (defensive copy)
    pub fn locales_found(&self) -> BTreeSet<String> {
        self.locales_found.clone()
    }

    /// All component names known to the catalog
    pub fn component_names(&self) -> &BTreeSet<String> {
        self.files.component_names()
    }

    pub fn duplicated_locale_count(&self) -> usize {
        self.duplicated.len()
    }

    /// Labels that collided on a locale, in collision order
    pub fn duplicated_locale_labels(&self) -> &[LabelKey] {
        &self.duplicated
    }

    pub fn contains_label(&self, label_key: &LabelKey) -> bool {
        self.labels.contains_key(label_key)
    }

    pub fn label(&self, label_key: &LabelKey) -> Option<&LabelEntry> {
        self.labels.get(label_key)
    }

    pub fn label_mut(&mut self, label_key: &LabelKey) -> Option<&mut LabelEntry> {
        self.labels.get_mut(label_key)
    }

    pub(crate) fn insert_label(&mut self, label_key: LabelKey, entry: LabelEntry) {
        self.labels.insert(label_key, entry);
    }
}

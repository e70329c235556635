use crate::error::LabelError;
use crate::parser::validate_locale;
use std::collections::BTreeMap;
use std::fmt;

/// Separator used when rendering a composite identity as one string
pub const KEY_SEPARATOR: char = '#';

/// Composite identity of one logical label: (key, owning file name).
///
/// Ordering sorts by key first, then file name, so iterating an index keyed
/// by `LabelKey` walks labels in the same order their rendered `key#file`
/// form suggests, without the collision risk of string concatenation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelKey {
    key: String,
    file_name: String,
}

impl LabelKey {
    pub fn new(key: &str, file_name: &str) -> Self {
        Self {
            key: key.to_string(),
            file_name: file_name.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, KEY_SEPARATOR, self.file_name)
    }
}

/// One locale's current text and comment for a label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelValue {
    pub value: String,
    pub comment: String,
}

/// One logical label: a key scoped to a resource file, holding one current
/// value per locale.
#[derive(Debug, Clone)]
pub struct LabelEntry {
    key: String,
    key_comment: String,
    file_name: String,
    values: BTreeMap<String, LabelValue>,
}

impl LabelEntry {
    /// Create an entry seeded with its first locale. The seed locale is
    /// validated; the legacy underscore form is rejected.
    pub fn new(
        key: &str,
        key_comment: &str,
        file_name: &str,
        locale: &str,
        value: &str,
        comment: &str,
    ) -> Result<Self, LabelError> {
        validate_locale(locale, file_name, key)?;
        let mut values = BTreeMap::new();
        values.insert(
            locale.to_string(),
            LabelValue {
                value: value.to_string(),
                comment: comment.to_string(),
            },
        );
        Ok(Self {
            key: key.to_string(),
            key_comment: key_comment.to_string(),
            file_name: file_name.to_string(),
            values,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn key_comment(&self) -> &str {
        &self.key_comment
    }

    pub fn set_key_comment(&mut self, key_comment: &str) {
        self.key_comment = key_comment.to_string();
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn label_key(&self) -> LabelKey {
        LabelKey::new(&self.key, &self.file_name)
    }

    /// Per-locale values, sorted by locale
    pub fn values(&self) -> &BTreeMap<String, LabelValue> {
        &self.values
    }

    pub fn value(&self, locale: &str) -> Option<&LabelValue> {
        self.values.get(locale)
    }

    /// Set one locale's value and comment.
    ///
    /// With `overwrite` off, an already-present locale keeps its first-seen
    /// value; returns `true` when the incoming value differed (a duplicate
    /// locale definition — a conflict). With `overwrite` on, the value and
    /// comment are always replaced and the return is `false`.
    pub fn set_value(&mut self, locale: &str, value: &str, comment: &str, overwrite: bool) -> bool {
        match self.values.get_mut(locale) {
            None => {
                self.values.insert(
                    locale.to_string(),
                    LabelValue {
                        value: value.to_string(),
                        comment: comment.to_string(),
                    },
                );
                false
            }
            Some(existing) => {
                if overwrite {
                    existing.value = value.to_string();
                    existing.comment = comment.to_string();
                    false
                } else {
                    existing.value != value
                }
            }
        }
    }
}

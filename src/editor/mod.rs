//! In-memory label editing. Edits mutate the session index only; nothing
//! is written back to the resource files.

use crate::index::{LabelEntry, LabelKey, MergeSession};
use tracing::error;

/// A batch of per-locale edits for one label.
///
/// `locale_names` and `locale_values` are parallel, ordered lists;
/// `locale_comments`, when present, is parallel to both.
#[derive(Debug, Clone, Default)]
pub struct LabelUpdate {
    pub locale_names: Vec<String>,
    pub locale_values: Vec<String>,
    pub locale_comments: Option<Vec<String>>,
    pub key: String,
    pub key_comment: String,
    pub file_name: String,
}

/// Editor over one merge session's index
pub struct LabelEditor<'a> {
    session: &'a mut MergeSession,
}

impl<'a> LabelEditor<'a> {
    pub fn new(session: &'a mut MergeSession) -> Self {
        Self { session }
    }

    /// Create or update a label from parallel locale/value/comment lists.
    ///
    /// Locales whose value and comment are both empty are skipped. Existing
    /// entries get their key-level comment refreshed and each locale written
    /// with overwrite enabled — explicit edits always win, even over locales
    /// that conflicted at parse time. Returns the number of locales written.
    ///
    /// A failure to construct a missing entry is logged and skipped rather
    /// than aborting the batch, so the returned count can undercount the
    /// non-empty inputs; callers must check it instead of assuming every
    /// locale was written.
    pub fn upsert(&mut self, update: &LabelUpdate) -> usize {
        let mut written = 0;
        let label_key = LabelKey::new(&update.key, &update.file_name);

        for (i, locale) in update.locale_names.iter().enumerate() {
            let value = update
                .locale_values
                .get(i)
                .map(String::as_str)
                .unwrap_or_default();
            let comment = update
                .locale_comments
                .as_ref()
                .and_then(|comments| comments.get(i))
                .map(String::as_str)
                .unwrap_or_default();
            if value.is_empty() && comment.is_empty() {
                continue;
            }

            if !self.session.contains_label(&label_key) {
                match LabelEntry::new(
                    &update.key,
                    &update.key_comment,
                    &update.file_name,
                    locale,
                    value,
                    comment,
                ) {
                    Ok(entry) => self.session.insert_label(label_key.clone(), entry),
                    Err(err) => error!("Failed to create label {label_key}: {err}"),
                }
            } else if let Some(entry) = self.session.label_mut(&label_key) {
                entry.set_key_comment(&update.key_comment);
            }

            if let Some(entry) = self.session.label_mut(&label_key) {
                entry.set_value(locale, value, comment, true);
                written += 1;
            }
        }
        written
    }
}

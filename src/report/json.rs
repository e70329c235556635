use crate::index::{MergeSession, QueryFilter};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use super::{locale_selected, selected_entries};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, session: &MergeSession, filter: &QueryFilter) -> Result<()> {
        let report = JsonReport::from_session(session, filter);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_labels: usize,
    labels: Vec<JsonLabel>,
    locales: Vec<String>,
    conflicts: JsonConflicts,
}

#[derive(Serialize)]
struct JsonLabel {
    key: String,
    file: String,
    component: Option<String>,
    key_comment: String,
    values: Vec<JsonLocaleValue>,
}

#[derive(Serialize)]
struct JsonLocaleValue {
    locale: String,
    value: String,
    comment: String,
}

#[derive(Serialize)]
struct JsonConflicts {
    count: usize,
    labels: Vec<String>,
}

impl JsonReport {
    fn from_session(session: &MergeSession, filter: &QueryFilter) -> Self {
        let labels: Vec<JsonLabel> = selected_entries(session, filter)
            .into_iter()
            .map(|(_, entry)| JsonLabel {
                key: entry.key().to_string(),
                file: entry.file_name().to_string(),
                component: session
                    .label_file(entry.file_name())
                    .map(|file| file.component.clone()),
                key_comment: entry.key_comment().to_string(),
                values: entry
                    .values()
                    .iter()
                    .filter(|(locale, _)| locale_selected(filter, locale))
                    .map(|(locale, value)| JsonLocaleValue {
                        locale: locale.clone(),
                        value: value.value.clone(),
                        comment: value.comment.clone(),
                    })
                    .collect(),
            })
            .collect();

        JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            total_labels: labels.len(),
            labels,
            locales: session.locales_found().into_iter().collect(),
            conflicts: JsonConflicts {
                count: session.duplicated_locale_count(),
                labels: session
                    .duplicated_locale_labels()
                    .iter()
                    .map(|label_key| label_key.to_string())
                    .collect(),
            },
        }
    }
}

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::index::{LabelEntry, LabelKey, MergeSession, QueryFilter};
use miette::Result;
use std::path::PathBuf;

/// Output format for query reports
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Reporter for rendering a populated merge session
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    /// Render the session's index. The filter's `key` and `locale` narrow
    /// what is displayed, not what was parsed.
    pub fn report(&self, session: &MergeSession, filter: &QueryFilter) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new();
                reporter.report(session, filter)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                reporter.report(session, filter)
            }
        }
    }
}

/// Entries to display: every merged entry, narrowed by the key filter
pub(crate) fn selected_entries<'a>(
    session: &'a MergeSession,
    filter: &QueryFilter,
) -> Vec<(&'a LabelKey, &'a LabelEntry)> {
    session
        .labels()
        .iter()
        .filter(|(label_key, _)| match filter.key.as_deref() {
            Some(key) if !key.is_empty() => label_key.key() == key,
            _ => true,
        })
        .collect()
}

/// True when the filter's locale selector admits this locale
pub(crate) fn locale_selected(filter: &QueryFilter, locale: &str) -> bool {
    match filter.locale.as_deref() {
        Some(selected) if !selected.is_empty() => selected == locale,
        _ => true,
    }
}

use crate::index::{MergeSession, QueryFilter};
use colored::Colorize;
use miette::Result;

use super::{locale_selected, selected_entries};

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, session: &MergeSession, filter: &QueryFilter) -> Result<()> {
        let entries = selected_entries(session, filter);

        if entries.is_empty() {
            println!("{}", "No labels matched.".yellow());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!("Found {} labels:", entries.len()).green().bold()
        );
        println!();

        for (label_key, entry) in &entries {
            println!("{}", label_key.to_string().cyan().bold());
            if !entry.key_comment().is_empty() {
                println!("  {}", entry.key_comment().dimmed());
            }
            for (locale, value) in entry.values() {
                if !locale_selected(filter, locale) {
                    continue;
                }
                println!("  {} = {}", locale.blue(), value.value);
                if !value.comment.is_empty() {
                    println!("    {}", value.comment.dimmed());
                }
            }
            println!();
        }

        self.print_summary(session);

        Ok(())
    }

    fn print_summary(&self, session: &MergeSession) {
        let locales: Vec<String> = session.locales_found().into_iter().collect();
        println!("{} {}", "Locales:".bold(), locales.join(", "));

        let conflicts = session.duplicated_locale_count();
        if conflicts > 0 {
            println!(
                "{}",
                format!("{} duplicated locale definitions:", conflicts)
                    .red()
                    .bold()
            );
            for label_key in session.duplicated_locale_labels() {
                println!("  {}", label_key.to_string().red());
            }
        } else {
            println!("{}", "No duplicated locale definitions.".green());
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

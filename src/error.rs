use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, parsing, merging, or editing label resources.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan classpath root {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("malformed XML in {file}: {source}")]
    MalformedXml {
        file: String,
        #[source]
        source: quick_xml::Error,
    },

    /// The old `en_AU` form is ambiguous about the language/country split;
    /// only the dash-separated `en-AU` form is accepted.
    #[error("label '{key}' in {file}: locale '{locale}' separates language and country with an underscore; use a dash instead")]
    UnderscoreLocale {
        file: String,
        key: String,
        locale: String,
    },
}

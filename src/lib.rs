//! searchlabels - localized UI label indexing for multi-component projects
//!
//! This library indexes the localized label definitions scattered across the
//! XML resource files of independently deployed components, and supports
//! querying, conflict detection, and in-memory editing of those labels.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Catalog** - Enumerate components and their classpath roots
//! 2. **Discovery** - Find label resource XML files, once per process
//! 3. **Parsing** - Stream per-locale label records out of each file
//! 4. **Merging** - Fold records into a per-session index, recording
//!    duplicated locale definitions as conflicts
//! 5. **Editing** - Upsert per-locale values in the session index
//! 6. **Reporting** - Render the index in terminal or JSON form

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod editor;
pub mod error;
pub mod index;
pub mod parser;
pub mod report;

pub use catalog::{ClasspathEntry, ClasspathKind, Component, ComponentCatalog};
pub use config::{ComponentEntry, Config};
pub use discovery::{FileFinder, FileIndex, LabelFile, SharedFileIndex};
pub use editor::{LabelEditor, LabelUpdate};
pub use error::LabelError;
pub use index::{LabelEntry, LabelKey, LabelValue, MergeSession, QueryFilter, KEY_SEPARATOR};
pub use parser::{LabelReader, RawLabel, RawValue};
pub use report::{ReportFormat, Reporter};

//! Component catalog: which components exist and where their classpath roots live.
//!
//! The catalog is built from configuration; nothing here touches the
//! filesystem. Only `Dir`-kind entries are ever scanned for label resources,
//! packaged archives stay in the catalog as inert entries.

use crate::config::Config;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Kind of classpath entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClasspathKind {
    Dir,
    Jar,
}

impl ClasspathKind {
    /// Infer the entry kind from its path
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jar") | Some("zip") => ClasspathKind::Jar,
            _ => ClasspathKind::Dir,
        }
    }
}

/// One classpath root contributed by a component
#[derive(Debug, Clone)]
pub struct ClasspathEntry {
    pub kind: ClasspathKind,
    pub location: PathBuf,
}

/// An independently deployed component and its classpath roots
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    pub classpath: Vec<ClasspathEntry>,
}

/// All components known to this process
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: Vec<Component>,
}

impl ComponentCatalog {
    pub fn from_config(config: &Config) -> Self {
        let components = config
            .components
            .iter()
            .map(|entry| {
                let mut classpath: Vec<ClasspathEntry> = entry
                    .classpath
                    .iter()
                    .map(|location| ClasspathEntry {
                        kind: ClasspathKind::from_path(location),
                        location: location.clone(),
                    })
                    .collect();
                classpath.extend(entry.jars.iter().map(|location| ClasspathEntry {
                    kind: ClasspathKind::Jar,
                    location: location.clone(),
                }));
                Component {
                    name: entry.name.clone(),
                    classpath,
                }
            })
            .collect();
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Sorted set of all known component names
    pub fn component_names(&self) -> BTreeSet<String> {
        self.components.iter().map(|c| c.name.clone()).collect()
    }
}

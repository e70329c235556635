use crate::catalog::{ClasspathKind, ComponentCatalog};
use crate::config::Config;
use crate::error::LabelError;
use ignore::WalkBuilder;
use quick_xml::events::Event;
use quick_xml::Reader;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Root element name that identifies a label resource document
const RESOURCE_ROOT: &[u8] = b"resource";

/// One discovered label resource file. Immutable once discovered.
#[derive(Debug, Clone)]
pub struct LabelFile {
    /// File name, unique within the index
    pub file_name: String,

    /// Absolute location on disk
    pub path: PathBuf,

    /// Name of the owning component
    pub component: String,
}

/// Index of every label resource file found on the component classpaths,
/// keyed by file name. Built once, then shared read-only.
#[derive(Debug, Default)]
pub struct FileIndex {
    files: BTreeMap<String, LabelFile>,
    component_names: BTreeSet<String>,
}

impl FileIndex {
    /// Look up a label file by name
    pub fn get(&self, file_name: &str) -> Option<&LabelFile> {
        self.files.get(file_name)
    }

    /// All discovered files, sorted by file name
    pub fn files(&self) -> &BTreeMap<String, LabelFile> {
        &self.files
    }

    /// All component names known to the catalog, sorted
    pub fn component_names(&self) -> &BTreeSet<String> {
        &self.component_names
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Finder for label resource files on component classpaths
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Scan every directory-kind classpath root in the catalog and build the
    /// file-name index. Archive entries and roots that are not directories
    /// on disk are skipped; traversal and read errors abort the build.
    pub fn build_index(&self, catalog: &ComponentCatalog) -> Result<FileIndex, LabelError> {
        let mut roots = Vec::new();
        for component in catalog.components() {
            for entry in &component.classpath {
                if entry.kind != ClasspathKind::Dir {
                    trace!("Skipping archive classpath entry: {}", entry.location.display());
                    continue;
                }
                if !entry.location.is_dir() {
                    trace!("Classpath root is not a directory: {}", entry.location.display());
                    continue;
                }
                roots.push((component.name.clone(), entry.location.clone()));
            }
        }

        let found: Vec<Vec<LabelFile>> = roots
            .par_iter()
            .map(|(component, root)| self.scan_root(component, root))
            .collect::<Result<_, _>>()?;

        let mut files = BTreeMap::new();
        for file in found.into_iter().flatten() {
            files.insert(file.file_name.clone(), file);
        }
        debug!("Found {} label resource files", files.len());

        Ok(FileIndex {
            files,
            component_names: catalog.component_names(),
        })
    }

    /// Scan a single classpath root for label resource XML files
    fn scan_root(&self, component: &str, root: &Path) -> Result<Vec<LabelFile>, LabelError> {
        debug!("Scanning classpath root: {}", root.display());

        let walker = WalkBuilder::new(root)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .git_global(true)       // Respect global gitignore
            .git_exclude(true)      // Respect .git/info/exclude
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)    // Don't follow symlinks
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|source| LabelError::Scan {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            if self.config.should_exclude(path) {
                trace!("Excluding: {}", path.display());
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            if !is_label_resource(path)? {
                continue;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            trace!("Found label resource: {}", path.display());
            files.push(LabelFile {
                file_name,
                path: path.to_path_buf(),
                component: component.to_string(),
            });
        }

        Ok(files)
    }
}

/// Check whether an XML file's document root is a label `resource` element.
/// Only the first start tag is read.
fn is_label_resource(path: &Path) -> Result<bool, LabelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = Reader::from_str(&contents);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Ok(e.name().as_ref() == RESOURCE_ROOT);
            }
            Ok(Event::Eof) => return Ok(false),
            // A file that is not even well-formed XML is simply not a label
            // resource; the strict parse happens later, on matching files only.
            Err(_) => return Ok(false),
            _ => {}
        }
        buf.clear();
    }
}

/// Process-wide label file index, built at most once and shared read-only.
///
/// Construct one at process start and inject it wherever sessions are
/// created; `get_or_build` guarantees a single filesystem scan even under
/// concurrent first callers.
#[derive(Default)]
pub struct SharedFileIndex {
    inner: Mutex<Option<Arc<FileIndex>>>,
}

impl SharedFileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared index, scanning the classpaths on the first call
    pub fn get_or_build(
        &self,
        finder: &FileFinder<'_>,
        catalog: &ComponentCatalog,
    ) -> Result<Arc<FileIndex>, LabelError> {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(index) = guard.as_ref() {
            return Ok(Arc::clone(index));
        }
        let built = Arc::new(finder.build_index(catalog)?);
        *guard = Some(Arc::clone(&built));
        Ok(built)
    }

    /// The index, if it has already been built
    pub fn get(&self) -> Option<Arc<FileIndex>> {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

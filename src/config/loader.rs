use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for searchlabels: the component catalog plus scan options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Components contributing label resource files
    pub components: Vec<ComponentEntry>,

    /// Patterns to exclude from classpath scans
    pub exclude: Vec<String>,
}

/// One component and the classpath roots it contributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentEntry {
    /// Component name, unique within the catalog
    pub name: String,

    /// Directory classpath roots scanned for label resource files
    pub classpath: Vec<PathBuf>,

    /// Packaged archive entries; listed in the catalog but never scanned
    pub jars: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            components: vec![],
            exclude: vec![
                "**/build/**".to_string(),
                "**/target/**".to_string(),
                "**/.gradle/**".to_string(),
                "**/.idea/**".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".searchlabels.yml",
            ".searchlabels.yaml",
            ".searchlabels.toml",
            "searchlabels.yml",
            "searchlabels.yaml",
            "searchlabels.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check if a pattern matches for exclusion
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Simple glob matching for patterns like "*Labels.xml" or "**/build/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with('*') && !pattern.contains('/') {
        let suffix = &pattern[1..];
        return text.ends_with(suffix);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        return text.starts_with(prefix);
    }

    // Path patterns with ** match a complete directory name anywhere in the path
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let dir_name = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return text.split(['/', '\\']).any(|segment| segment == dir_name);
    }

    pattern == text
}

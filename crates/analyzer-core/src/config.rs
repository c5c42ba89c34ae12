//! Optional `.project-analyzer.toml`, additive over the authoritative
//! defaults in `spec.md` §6/§4.7 — absent a config file, those defaults
//! apply untouched.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = ".project-analyzer.toml";

/// Top-level configuration. Every field is additive: entries here extend
/// (never replace) the built-in ignore set, supported extensions, and layer
/// substring cascade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub extensions: ExtensionsConfig,
    #[serde(default)]
    pub layers: LayersConfig,
}

/// Extra directory names to ignore, beyond the built-in set
/// (`crate::scan::IGNORED_DIRS`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub extra_ignored_dirs: Vec<String>,
}

/// Extra extensions admitted into `files[]`/dependency analysis, beyond
/// `crate::classify`'s built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    #[serde(default)]
    pub extra_supported: Vec<String>,
}

/// Extra substring patterns appended to each layer's cascade check, tried
/// before the respective built-in list for that layer (but still after any
/// earlier-cascading layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayersConfig {
    #[serde(default)]
    pub presentation: Vec<String>,
    #[serde(default)]
    pub business: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub utils: Vec<String>,
    #[serde(default)]
    pub config: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Load `<dir>/.project-analyzer.toml` if present, falling back to
    /// defaults on a missing file or a parse error (a malformed config
    /// should never fail the whole analysis).
    pub fn load_or_default(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_fully_empty() {
        let config = Config::default();
        assert!(config.scan.extra_ignored_dirs.is_empty());
        assert!(config.extensions.extra_supported.is_empty());
        assert!(config.layers.presentation.is_empty());
    }

    #[test]
    fn deserializes_partial_overrides() {
        let toml_str = r#"
[scan]
extra_ignored_dirs = ["vendor"]

[extensions]
extra_supported = ["zig"]

[layers]
business = ["usecase"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scan.extra_ignored_dirs, vec!["vendor".to_string()]);
        assert_eq!(config.extensions.extra_supported, vec!["zig".to_string()]);
        assert_eq!(config.layers.business, vec!["usecase".to_string()]);
        assert!(config.layers.data.is_empty());
    }

    #[test]
    fn load_or_default_falls_back_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.scan.extra_ignored_dirs, Vec::<String>::new());
    }

    #[test]
    fn load_or_default_reads_present_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".project-analyzer.toml"),
            "[scan]\nextra_ignored_dirs = [\"generated\"]\n",
        )
        .unwrap();
        let config = Config::load_or_default(dir.path());
        assert_eq!(config.scan.extra_ignored_dirs, vec!["generated".to_string()]);
    }
}

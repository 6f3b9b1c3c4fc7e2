//! Project directory layout.

use std::path::{Path, PathBuf};

/// Name of the loader config file inside the data directory.
pub const DATA_LOADER_CONFIG_FILE: &str = "dataLoader_config.json";

pub const ROOT_ENV: &str = "PREPKIT_ROOT";
pub const DATA_DIR_ENV: &str = "PREPKIT_DATA_DIR";
pub const LOG_DIR_ENV: &str = "PREPKIT_LOG_DIR";
pub const OUTPUT_DIR_ENV: &str = "PREPKIT_OUTPUT_DIR";

/// Directories the library reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    /// Holds `dataLoader_config.json` and the constants it names.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    /// Standard layout under `root`: `data/`, `logs/`, `output/`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            log_dir: root.join("logs"),
            output_dir: root.join("output"),
            root,
        }
    }

    /// Layout from `PREPKIT_*` environment variables, defaulting to the
    /// standard layout under the current directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Layout from an arbitrary variable lookup. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let mut paths = Self::new(get(ROOT_ENV).unwrap_or_else(|| PathBuf::from(".")));
        if let Some(dir) = get(DATA_DIR_ENV) {
            paths.data_dir = dir;
        }
        if let Some(dir) = get(LOG_DIR_ENV) {
            paths.log_dir = dir;
        }
        if let Some(dir) = get(OUTPUT_DIR_ENV) {
            paths.output_dir = dir;
        }
        paths
    }

    /// Path of the loader config file.
    pub fn data_loader_config(&self) -> PathBuf {
        self.data_dir.join(DATA_LOADER_CONFIG_FILE)
    }

    /// Resolve `name` inside the output directory.
    pub fn output_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(name)
    }
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

//! One-time loader for the regex constant lists.
//!
//! The data directory holds `dataLoader_config.json`, which names the JSON
//! file carrying the keyword lists:
//!
//! ```text
//! data/
//! ├── dataLoader_config.json   # {"regexFile": "regex_constants.json"}
//! └── regex_constants.json     # {"COMPANY_KEYWORD_LIST": [...], "JOB_TITLE_SUFFIX_LIST": [...]}
//! ```
//!
//! A [`DataLoader`] is created by the process entry point and handed to the
//! code that needs the constants; nothing here is process-global.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::io::read_json_sync_or_throw;
use crate::text::EntityExtractor;

use super::paths::{ProjectPaths, DATA_LOADER_CONFIG_FILE};

/// Contents of `dataLoader_config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLoaderConfig {
    /// Constants file name, relative to the data directory.
    pub regex_file: String,
}

/// Keyword lists that tune entity extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexConstants {
    #[serde(rename = "COMPANY_KEYWORD_LIST")]
    pub company_keyword_list: Vec<String>,
    #[serde(rename = "JOB_TITLE_SUFFIX_LIST")]
    pub job_title_suffix_list: Vec<String>,
}

/// Loads [`RegexConstants`] from a data directory exactly once.
#[derive(Debug)]
pub struct DataLoader {
    data_dir: PathBuf,
    constants: OnceCell<RegexConstants>,
}

impl DataLoader {
    /// Create a loader reading from `data_dir`. Nothing is read yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            constants: OnceCell::new(),
        }
    }

    /// Create a loader for the project's data directory.
    pub fn from_paths(paths: &ProjectPaths) -> Self {
        Self::new(&paths.data_dir)
    }

    /// Directory the loader reads from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Whether the constants have been loaded.
    pub fn is_initialized(&self) -> bool {
        self.constants.get().is_some()
    }

    /// Load the constants, or return the ones already loaded.
    ///
    /// Only the first successful call touches the filesystem.
    pub fn initialize(&self) -> Result<&RegexConstants> {
        self.constants.get_or_try_init(|| self.load())
    }

    /// Fail-fast startup variant of [`initialize`](Self::initialize).
    ///
    /// Misconfiguration is logged and the process exits with status 1.
    pub fn initialize_or_exit(&self) -> &RegexConstants {
        match self.initialize() {
            Ok(constants) => constants,
            Err(e) => {
                tracing::error!(
                    data_dir = %self.data_dir.display(),
                    error = %e,
                    "failed to initialize data, exiting"
                );
                std::process::exit(1);
            }
        }
    }

    /// The loaded constants; fails before [`initialize`](Self::initialize).
    pub fn regex_constants(&self) -> Result<&RegexConstants> {
        self.constants.get().ok_or(PrepError::NotInitialized)
    }

    /// Build an [`EntityExtractor`] from the loaded constants.
    pub fn extractor(&self) -> Result<EntityExtractor> {
        EntityExtractor::new(self.regex_constants()?)
    }

    fn load(&self) -> Result<RegexConstants> {
        let config_path = self.data_dir.join(DATA_LOADER_CONFIG_FILE);
        let config: DataLoaderConfig = read_json_sync_or_throw(&config_path)?;

        if config.regex_file.trim().is_empty() {
            return Err(PrepError::Config(format!(
                "'regexFile' is empty in '{}'",
                config_path.display()
            )));
        }

        let regex_path = self.data_dir.join(config.regex_file.trim());
        let constants: RegexConstants = read_json_sync_or_throw(&regex_path)?;

        tracing::info!(
            file = %regex_path.display(),
            company_keywords = constants.company_keyword_list.len(),
            job_title_suffixes = constants.job_title_suffix_list.len(),
            "loaded regex constants"
        );

        Ok(constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_data_dir(regex_file: &str, constants: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(DATA_LOADER_CONFIG_FILE),
            format!(r#"{{"regexFile": "{}"}}"#, regex_file),
        )
        .unwrap();
        fs::write(dir.path().join("regex.json"), constants).unwrap();
        dir
    }

    #[test]
    fn test_initialize_loads_constants() {
        let dir = write_data_dir(
            "regex.json",
            r#"{"COMPANY_KEYWORD_LIST": ["Inc"], "JOB_TITLE_SUFFIX_LIST": ["MD", "PhD"]}"#,
        );
        let loader = DataLoader::new(dir.path());

        assert!(!loader.is_initialized());
        assert!(matches!(loader.regex_constants(), Err(PrepError::NotInitialized)));

        let constants = loader.initialize().unwrap();
        assert_eq!(constants.company_keyword_list, vec!["Inc"]);
        assert_eq!(constants.job_title_suffix_list.len(), 2);
        assert!(loader.is_initialized());
    }

    #[test]
    fn test_second_initialize_does_not_read_files() {
        let dir = write_data_dir(
            "regex.json",
            r#"{"COMPANY_KEYWORD_LIST": ["LLC"], "JOB_TITLE_SUFFIX_LIST": []}"#,
        );
        let loader = DataLoader::new(dir.path());
        let first = loader.initialize().unwrap().clone();

        // With the files gone a second read would fail.
        fs::remove_file(dir.path().join("regex.json")).unwrap();
        fs::remove_file(dir.path().join(DATA_LOADER_CONFIG_FILE)).unwrap();

        let second = loader.initialize().unwrap();
        assert_eq!(&first, second);
        assert_eq!(loader.regex_constants().unwrap(), &first);
    }

    #[test]
    fn test_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(dir.path());
        assert!(loader.initialize().is_err());
        assert!(!loader.is_initialized());
    }

    #[test]
    fn test_invalid_constants_fail() {
        let dir = write_data_dir("regex.json", r#"{"COMPANY_KEYWORD_LIST": "not a list"}"#);
        assert!(matches!(
            DataLoader::new(dir.path()).initialize(),
            Err(PrepError::Json(_))
        ));

        let dir = write_data_dir("  ", "{}");
        assert!(matches!(
            DataLoader::new(dir.path()).initialize(),
            Err(PrepError::Config(_))
        ));
    }

    #[test]
    fn test_extractor_requires_initialization() {
        let dir = write_data_dir(
            "regex.json",
            r#"{"COMPANY_KEYWORD_LIST": ["Inc"], "JOB_TITLE_SUFFIX_LIST": ["MD"]}"#,
        );
        let loader = DataLoader::new(dir.path());
        assert!(loader.extractor().is_err());

        loader.initialize().unwrap();
        let extractor = loader.extractor().unwrap();
        assert!(extractor.contains_company_keyword("Acme Inc"));
    }
}

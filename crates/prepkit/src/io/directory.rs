//! Directory listing filtered by extension.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, Result};

/// Which files [`directory_files`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Extensions to keep, with or without the leading dot; empty keeps all.
    pub target_extensions: Vec<String>,
}

impl DirectoryOptions {
    /// Keep only files with one of `extensions`.
    pub fn with_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            recursive: false,
            target_extensions: extensions
                .iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Case-insensitive suffix match on the file name, so multi-dot targets
    /// (`.tar.gz`) and dot files (`.csv`) match too.
    fn accepts(&self, path: &Path) -> bool {
        if self.target_extensions.is_empty() {
            return true;
        }
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let file_name = file_name.to_string_lossy().to_lowercase();
        self.target_extensions.iter().any(|target| {
            let target = target.trim_start_matches('.').to_lowercase();
            !target.is_empty() && file_name.ends_with(&format!(".{}", target))
        })
    }
}

/// List files under `dir` matching `options`, sorted by path.
///
/// Fails when `dir` (or a subdirectory, when recursive) cannot be read, so an
/// empty result always means no matching files.
pub fn directory_files_or_throw(dir: impl AsRef<Path>, options: &DirectoryOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(dir.as_ref(), options, &mut files)?;
    files.sort();
    Ok(files)
}

/// Safe variant of [`directory_files_or_throw`]: logs and returns `[]` on error.
pub fn directory_files(dir: impl AsRef<Path>, options: &DirectoryOptions) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    directory_files_or_throw(dir, options).unwrap_or_else(|e| {
        tracing::error!(dir = %dir.display(), error = %e, "failed to list directory");
        Vec::new()
    })
}

fn collect(dir: &Path, options: &DirectoryOptions, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| PrepError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| PrepError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| PrepError::io(&path, e))?;

        // Symlinks are followed for classification only.
        let (is_file, is_dir) = if file_type.is_symlink() {
            (path.is_file(), false)
        } else {
            (file_type.is_file(), file_type.is_dir())
        };

        if is_dir && options.recursive {
            collect(&path, options, files)?;
        } else if is_file && options.accepts(&path) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "x\n1\n").unwrap();
        fs::write(dir.path().join("B.CSV"), "x\n2\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.csv"), "x\n3\n").unwrap();
        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_filters_by_extension_case_insensitive() {
        let dir = fixture();
        let files = directory_files(dir.path(), &DirectoryOptions::with_extensions(&[".csv"]));
        assert_eq!(names(&files), vec!["B.CSV", "a.csv"]);
    }

    #[test]
    fn test_recursive_listing() {
        let dir = fixture();
        let options = DirectoryOptions::with_extensions(&["csv"]).recursive();
        let files = directory_files(dir.path(), &options);
        assert_eq!(names(&files), vec!["B.CSV", "a.csv", "c.csv"]);
    }

    #[test]
    fn test_no_filter_returns_all_files() {
        let dir = fixture();
        let files = directory_files(dir.path(), &DirectoryOptions::default());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dir = fixture();
        let files = directory_files_or_throw(dir.path(), &DirectoryOptions::with_extensions(&["xlsx"]));
        assert!(files.unwrap().is_empty());
    }

    #[test]
    fn test_multi_dot_and_dot_file_targets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("backup.TAR.GZ"), "").unwrap();
        fs::write(dir.path().join("plain.gz"), "").unwrap();
        fs::write(dir.path().join(".csv"), "x\n").unwrap();
        fs::write(dir.path().join("csv"), "x\n").unwrap();

        let archives = directory_files(dir.path(), &DirectoryOptions::with_extensions(&[".tar.gz"]));
        assert_eq!(names(&archives), vec!["backup.TAR.GZ"]);

        let csv = directory_files(dir.path(), &DirectoryOptions::with_extensions(&["CSV"]));
        assert_eq!(names(&csv), vec![".csv"]);
    }

    #[test]
    fn test_missing_directory() {
        let options = DirectoryOptions::default();
        assert!(directory_files("/no/such/dir", &options).is_empty());
        assert!(matches!(
            directory_files_or_throw("/no/such/dir", &options),
            Err(PrepError::Io { .. })
        ));
    }
}

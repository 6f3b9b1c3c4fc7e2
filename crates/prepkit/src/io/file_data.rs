//! In-memory files and the source abstraction shared by the readers.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// A file carried in memory, e.g. from an upload: name plus base64 content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_name: String,
    /// Base64-encoded (standard alphabet) file bytes.
    pub file_content: String,
}

impl FileData {
    /// Wrap already-encoded content.
    pub fn new(file_name: impl Into<String>, file_content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_content: file_content.into(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(file_name, STANDARD.encode(bytes))
    }

    /// Read a file from disk, keeping only its file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| PrepError::io(path, e))?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(file_name, &bytes))
    }

    /// Decode the content to bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.file_content.trim())?)
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(Path::new(&self.file_name))
    }
}

/// Lowercased extension of `path`, without the dot.
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Where a reader gets its bytes: a filesystem path or an in-memory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Data(FileData),
}

impl FileSource {
    /// Path or file name, for log messages.
    pub fn name(&self) -> String {
        match self {
            FileSource::Path(path) => path.display().to_string(),
            FileSource::Data(data) => data.file_name.clone(),
        }
    }

    /// Lowercased extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        match self {
            FileSource::Path(path) => extension_of(path),
            FileSource::Data(data) => data.extension(),
        }
    }

    /// Full contents as bytes.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            FileSource::Path(path) => fs::read(path).map_err(|e| PrepError::io(path, e)),
            FileSource::Data(data) => data.decode(),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        FileSource::Path(path)
    }
}

impl From<&PathBuf> for FileSource {
    fn from(path: &PathBuf) -> Self {
        FileSource::Path(path.clone())
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        FileSource::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        FileSource::Path(PathBuf::from(path))
    }
}

impl From<String> for FileSource {
    fn from(path: String) -> Self {
        FileSource::Path(PathBuf::from(path))
    }
}

impl From<FileData> for FileSource {
    fn from(data: FileData) -> Self {
        FileSource::Data(data)
    }
}

impl From<&FileData> for FileSource {
    fn from(data: &FileData) -> Self {
        FileSource::Data(data.clone())
    }
}

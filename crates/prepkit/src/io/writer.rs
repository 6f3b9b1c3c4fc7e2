//! Writing rows and JSON to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{PrepError, Result};

use super::file_data::extension_of;
use super::reader::{Delimiter, Row};

/// Format used by [`file_name_timestamp`].
pub const FILE_NAME_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Write rows as CSV or TSV, chosen by the extension of `path`.
///
/// The header is the union of all row keys in first-seen order; missing
/// cells are written empty.
pub fn write_rows_to_csv(rows: &[Row], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_rows(rows, path).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to write rows");
    })
}

fn write_rows(rows: &[Row], path: &Path) -> Result<()> {
    let extension = extension_of(path).unwrap_or_default();
    let delimiter = Delimiter::for_extension(&extension)
        .ok_or_else(|| PrepError::UnsupportedFormat(format!("cannot write rows to '.{}'", extension)))?;

    let headers: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_path(path)?;

    if !headers.is_empty() {
        writer.write_record(&headers)?;
    }
    for row in rows {
        writer.write_record(
            headers
                .iter()
                .map(|header| row.get(*header).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush().map_err(|e| PrepError::io(path, e))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote rows");
    Ok(())
}

/// Serialize `value` with `indent` spaces per level; compact when `indent` is 0.
pub fn indented_stringify<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| PrepError::Config(format!("serialized JSON is not UTF-8: {}", e)))
}

/// Write `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>, indent: usize) -> Result<()> {
    let path = path.as_ref();
    let written = indented_stringify(value, indent).and_then(|json| {
        ensure_parent(path)?;
        let file = File::create(path).map_err(|e| PrepError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(json.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| PrepError::io(path, e))
    });
    written.inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to write JSON");
    })
}

/// Truncate `path` to zero length, creating it if needed.
pub fn clear_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)
        .and_then(|_| File::create(path).map(|_| ()).map_err(|e| PrepError::io(path, e)))
        .inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to clear file");
        })
}

/// Local time formatted for use in file names, e.g. `2024-05-01_13-45-09`.
pub fn file_name_timestamp() -> String {
    Local::now().format(FILE_NAME_TIMESTAMP_FORMAT).to_string()
}

/// `dir/stem_<timestamp>.ext`.
pub fn timestamped_path(dir: impl AsRef<Path>, stem: &str, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    dir.as_ref()
        .join(format!("{}_{}.{}", stem, file_name_timestamp(), extension))
}

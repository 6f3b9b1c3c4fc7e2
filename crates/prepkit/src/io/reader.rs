//! CSV/TSV, Excel and JSON readers.
//!
//! Readers come in pairs. The `*_or_throw` variant returns the error; the
//! plain variant logs it and returns an empty value, so a missing or broken
//! file reads as "no rows".

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PrepError, Result};

use super::file_data::FileSource;

/// One record keyed by header, in column order.
pub type Row = IndexMap<String, String>;

/// Workbook extensions routed to the Excel reader.
pub const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field delimiter of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    /// `csv` → comma, `tsv` → tab (case-insensitive, dot optional).
    pub fn for_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" => Some(Delimiter::Tab),
            _ => None,
        }
    }

    /// Delimiter for a source, based on its extension.
    pub fn for_source(source: &FileSource) -> Result<Self> {
        source
            .extension()
            .and_then(|ext| Self::for_extension(&ext))
            .ok_or_else(|| {
                PrepError::UnsupportedFormat(format!(
                    "'{}' is not a .csv or .tsv file",
                    source.name()
                ))
            })
    }
}

/// Options for [`read_rows`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet to read; the first sheet is used when absent or not found.
    pub sheet_name: Option<String>,
}

impl ReadOptions {
    pub fn with_sheet(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: Some(sheet_name.into()),
        }
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

// =============================================================================
// ROWS
// =============================================================================

/// Read rows from a CSV, TSV or workbook file, dispatching on extension.
pub fn read_rows_or_throw(source: impl Into<FileSource>, options: &ReadOptions) -> Result<Vec<Row>> {
    let source: FileSource = source.into();
    let extension = source.extension().unwrap_or_default();

    if Delimiter::for_extension(&extension).is_some() {
        read_csv_rows_or_throw(source)
    } else if EXCEL_EXTENSIONS.contains(&extension.as_str()) {
        read_excel_rows_or_throw(source, options.sheet_name.as_deref())
    } else {
        Err(PrepError::UnsupportedFormat(format!(
            "cannot read rows from '{}'",
            source.name()
        )))
    }
}

/// Like [`read_rows_or_throw`], but logs failures and returns no rows.
pub fn read_rows(source: impl Into<FileSource>, options: &ReadOptions) -> Vec<Row> {
    let source: FileSource = source.into();
    let name = source.name();
    read_rows_or_throw(source, options).unwrap_or_else(|e| {
        tracing::error!(source = %name, error = %e, "failed to read rows");
        Vec::new()
    })
}

/// Read a delimited text file. The first record is the header row.
///
/// Short records are padded with empty strings and long ones truncated to
/// the header width.
pub fn read_csv_rows_or_throw(source: impl Into<FileSource>) -> Result<Vec<Row>> {
    let source: FileSource = source.into();
    let delimiter = Delimiter::for_source(&source)?;
    let bytes = source.read_bytes()?;
    parse_delimited(strip_bom(&bytes), delimiter)
}

/// Like [`read_csv_rows_or_throw`], but logs failures and returns no rows.
pub fn read_csv_rows(source: impl Into<FileSource>) -> Vec<Row> {
    let source: FileSource = source.into();
    let name = source.name();
    read_csv_rows_or_throw(source).unwrap_or_else(|e| {
        tracing::error!(source = %name, error = %e, "failed to read delimited rows");
        Vec::new()
    })
}

/// Parse delimited bytes into rows keyed by the header record.
pub fn parse_delimited(bytes: &[u8], delimiter: Delimiter) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if raw.iter().all(|h| h.is_empty()) {
        return Err(PrepError::EmptyData("No header row found".to_string()));
    }
    let headers = unique_headers(raw);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Rename repeated header names to `name_2`, `name_3`, ... so no column is
/// lost to a key collision.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::with_capacity(raw.len());
    for header in raw {
        if !seen.contains(&header) {
            seen.insert(header);
            continue;
        }
        let renamed = (2..)
            .map(|n| format!("{}_{}", header, n))
            .find(|candidate| !seen.contains(candidate))
            .unwrap_or_default();
        tracing::warn!(header = %header, renamed = %renamed, "duplicate column header renamed");
        seen.insert(renamed);
    }
    seen.into_iter().collect()
}

/// True when the file has a header and every record matches its width.
pub fn is_valid_csv(source: impl Into<FileSource>) -> bool {
    let source: FileSource = source.into();
    let Ok(delimiter) = Delimiter::for_source(&source) else {
        return false;
    };
    let Ok(bytes) = source.read_bytes() else {
        return false;
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(false)
        .from_reader(strip_bom(&bytes));

    match reader.headers() {
        Ok(headers) if headers.iter().any(|h| !h.trim().is_empty()) => {}
        _ => return false,
    }
    reader.records().all(|record| record.is_ok())
}

// =============================================================================
// EXCEL
// =============================================================================

/// Read one worksheet. The first row is the header row.
///
/// `sheet_name` selects the worksheet; when it is absent or not in the
/// workbook the first sheet is read.
#[cfg(feature = "excel")]
pub fn read_excel_rows_or_throw(
    source: impl Into<FileSource>,
    sheet_name: Option<&str>,
) -> Result<Vec<Row>> {
    use calamine::{open_workbook_auto_from_rs, Reader};

    let source: FileSource = source.into();
    let bytes = source.read_bytes()?;
    let mut workbook = open_workbook_auto_from_rs(std::io::Cursor::new(bytes))
        .map_err(|e| PrepError::Excel(format!("'{}': {}", source.name(), e)))?;

    let sheet_names = workbook.sheet_names();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| PrepError::EmptyData(format!("'{}' has no worksheets", source.name())))?;
    let target = match sheet_name {
        Some(name) if sheet_names.iter().any(|n| n == name) => name.to_string(),
        Some(name) => {
            tracing::warn!(
                source = %source.name(),
                sheet = name,
                fallback = %first,
                "worksheet not found, reading first sheet"
            );
            first
        }
        None => first,
    };

    let range = workbook
        .worksheet_range(&target)
        .map_err(|e| PrepError::Excel(format!("'{}' sheet '{}': {}", source.name(), target, e)))?;

    let mut records = range.rows();
    let Some(header_cells) = records.next() else {
        return Ok(Vec::new());
    };
    let headers = unique_headers(
        header_cells
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect(),
    );

    Ok(records
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    (header.clone(), cells.get(i).map(cell_to_string).unwrap_or_default())
                })
                .collect()
        })
        .collect())
}

#[cfg(not(feature = "excel"))]
pub fn read_excel_rows_or_throw(
    source: impl Into<FileSource>,
    _sheet_name: Option<&str>,
) -> Result<Vec<Row>> {
    let source: FileSource = source.into();
    Err(PrepError::UnsupportedFormat(format!(
        "'{}': workbook support requires the `excel` feature",
        source.name()
    )))
}

/// Like [`read_excel_rows_or_throw`], but logs failures and returns no rows.
pub fn read_excel_rows(source: impl Into<FileSource>, sheet_name: Option<&str>) -> Vec<Row> {
    let source: FileSource = source.into();
    let name = source.name();
    read_excel_rows_or_throw(source, sheet_name).unwrap_or_else(|e| {
        tracing::error!(source = %name, error = %e, "failed to read worksheet rows");
        Vec::new()
    })
}

/// Render a cell as text; whole floats print without a fraction.
#[cfg(feature = "excel")]
fn cell_to_string(cell: &calamine::Data) -> String {
    use calamine::Data;

    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Deserialize a JSON file, returning any read or parse error.
pub fn read_json_sync_or_throw<T: DeserializeOwned>(source: impl Into<FileSource>) -> Result<T> {
    let source: FileSource = source.into();
    let bytes = source.read_bytes()?;
    Ok(serde_json::from_slice(strip_bom(&bytes))?)
}

/// Read a JSON file that holds an object.
///
/// Missing files, malformed JSON and non-object documents are logged and
/// yield an empty map.
pub fn read_json_file_as_object(source: impl Into<FileSource>) -> Map<String, Value> {
    let source: FileSource = source.into();
    let name = source.name();
    match read_json_sync_or_throw::<Value>(source) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::error!(
                source = %name,
                found = crate::validation::type_name(&other),
                "JSON document is not an object"
            );
            Map::new()
        }
        Err(e) => {
            tracing::error!(source = %name, error = %e, "failed to read JSON object");
            Map::new()
        }
    }
}

// =============================================================================
// COLUMNS
// =============================================================================

/// Trimmed, non-blank values of `column`, optionally de-duplicated.
pub fn column_values(rows: &[Row], column: &str, allow_duplicates: bool) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in rows.iter().filter_map(|row| row.get(column)) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if allow_duplicates || !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Map each trimmed, non-blank value of `column` to the row indices holding it.
pub fn indexed_column_values(rows: &[Row], column: &str) -> IndexMap<String, Vec<usize>> {
    let mut index: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let Some(value) = row.get(column).map(|v| v.trim()) else {
            continue;
        };
        if !value.is_empty() {
            index.entry(value.to_string()).or_default().push(row_idx);
        }
    }
    index
}

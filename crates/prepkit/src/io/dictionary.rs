//! Dictionaries built from two columns of tabular rows.

use indexmap::IndexMap;

use crate::text::{clean, CleanOptions};

use super::file_data::FileSource;
use super::reader::{read_rows_or_throw, ReadOptions, Row};

/// How keys and values are normalized before insertion.
#[derive(Debug, Clone, Default)]
pub struct DictionaryOptions {
    /// Cleaning applied to keys; raw trimmed keys when `None`.
    pub key_clean: Option<CleanOptions>,
    /// Cleaning applied to values; raw trimmed values when `None`.
    pub value_clean: Option<CleanOptions>,
    /// Forwarded to the row reader.
    pub read: ReadOptions,
}

fn normalized(value: &str, options: Option<&CleanOptions>) -> String {
    match options {
        Some(options) => clean(value, options),
        None => value.trim().to_string(),
    }
}

/// Non-blank `(key, value)` pairs after normalization.
fn pairs<'a>(
    rows: &'a [Row],
    key_column: &'a str,
    value_column: &'a str,
    options: &'a DictionaryOptions,
) -> impl Iterator<Item = (String, String)> + 'a {
    rows.iter().filter_map(move |row| {
        let key = normalized(row.get(key_column)?, options.key_clean.as_ref());
        let value = normalized(row.get(value_column)?, options.value_clean.as_ref());
        (!key.is_empty() && !value.is_empty()).then_some((key, value))
    })
}

/// Map each key to a single value.
///
/// When a key repeats with a different value the first value is kept and a
/// warning is logged. Rows with a blank key or value are skipped.
pub fn one_to_one_dictionary_from_rows(
    rows: &[Row],
    key_column: &str,
    value_column: &str,
    options: &DictionaryOptions,
) -> IndexMap<String, String> {
    let mut dictionary: IndexMap<String, String> = IndexMap::new();
    for (key, value) in pairs(rows, key_column, value_column, options) {
        match dictionary.get(&key) {
            Some(existing) if *existing != value => {
                tracing::warn!(
                    key = %key,
                    kept = %existing,
                    ignored = %value,
                    "duplicate key with a different value"
                );
            }
            Some(_) => {}
            None => {
                dictionary.insert(key, value);
            }
        }
    }
    dictionary
}

/// Map each key to its distinct values, in first-seen order.
pub fn one_to_many_dictionary_from_rows(
    rows: &[Row],
    key_column: &str,
    value_column: &str,
    options: &DictionaryOptions,
) -> IndexMap<String, Vec<String>> {
    let mut dictionary: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs(rows, key_column, value_column, options) {
        let values = dictionary.entry(key).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }
    dictionary
}

/// Read a file and build a one-to-one dictionary. Empty on read failure.
pub fn one_to_one_dictionary(
    source: impl Into<FileSource>,
    key_column: &str,
    value_column: &str,
    options: &DictionaryOptions,
) -> IndexMap<String, String> {
    let source: FileSource = source.into();
    let name = source.name();
    match read_rows_or_throw(source, &options.read) {
        Ok(rows) => one_to_one_dictionary_from_rows(&rows, key_column, value_column, options),
        Err(e) => {
            tracing::error!(source = %name, error = %e, "failed to build one-to-one dictionary");
            IndexMap::new()
        }
    }
}

/// Read a file and build a one-to-many dictionary. Empty on read failure.
pub fn one_to_many_dictionary(
    source: impl Into<FileSource>,
    key_column: &str,
    value_column: &str,
    options: &DictionaryOptions,
) -> IndexMap<String, Vec<String>> {
    let source: FileSource = source.into();
    let name = source.name();
    match read_rows_or_throw(source, &options.read) {
        Ok(rows) => one_to_many_dictionary_from_rows(&rows, key_column, value_column, options),
        Err(e) => {
            tracing::error!(source = %name, error = %e, "failed to build one-to-many dictionary");
            IndexMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{parse_delimited, Delimiter, FileData};
    use crate::text::CaseOptions;

    fn rows() -> Vec<Row> {
        parse_delimited(
            b"state,city\nCA,Los Angeles\nca, San Diego\nNY,New York\nCA,Los Angeles\n,Nowhere\nTX,\n",
            Delimiter::Comma,
        )
        .unwrap()
    }

    #[test]
    fn test_one_to_one_keeps_first() {
        let dict = one_to_one_dictionary_from_rows(&rows(), "state", "city", &DictionaryOptions::default());
        assert_eq!(dict.len(), 3);
        assert_eq!(dict["CA"], "Los Angeles");
        assert_eq!(dict["ca"], "San Diego");
        assert!(!dict.contains_key("TX"));
    }

    #[test]
    fn test_one_to_one_with_key_cleaning() {
        let options = DictionaryOptions {
            key_clean: Some(CleanOptions::default().with_case(CaseOptions::Upper)),
            ..Default::default()
        };
        let dict = one_to_one_dictionary_from_rows(&rows(), "state", "city", &options);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["CA"], "Los Angeles");
    }

    #[test]
    fn test_one_to_many_dedupes() {
        let options = DictionaryOptions {
            key_clean: Some(CleanOptions::default().with_case(CaseOptions::Upper)),
            ..Default::default()
        };
        let dict = one_to_many_dictionary_from_rows(&rows(), "state", "city", &options);
        assert_eq!(dict["CA"], vec!["Los Angeles", "San Diego"]);
        assert_eq!(dict["NY"], vec!["New York"]);
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["CA", "NY"]);
    }

    #[test]
    fn test_dictionary_from_source() {
        let data = FileData::from_bytes("codes.tsv", b"code\tname\nA1\tAlpha\nB2\tBeta\n");
        let dict = one_to_one_dictionary(&data, "code", "name", &DictionaryOptions::default());
        assert_eq!(dict["B2"], "Beta");

        let missing = one_to_many_dictionary("/no/such/file.csv", "a", "b", &DictionaryOptions::default());
        assert!(missing.is_empty());
    }
}

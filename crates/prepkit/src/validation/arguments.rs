//! Argument validators.
//!
//! Each validator checks one precondition of a caller's input and returns
//! [`PrepError::InvalidArgument`] when it fails, after logging the failure.
//! The canonical signature is `(source, label, value)`; callers that carry a
//! single-key object such as `{"fileName": ...}` go through
//! [`labeled_argument`] or [`validate_labeled`] instead.
//!
//! # Example
//!
//! ```
//! use prepkit::validation::{string_argument, validate_labeled};
//! use serde_json::json;
//!
//! assert!(string_argument("reader.load", "fileName", &json!("rows.csv")).is_ok());
//! assert!(validate_labeled("reader.load", &json!({"fileName": ""}), string_argument).is_err());
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{PrepError, Result};

use super::predicates::{
    describe_value, is_boolean, is_integer, is_non_empty_string, is_numeric, is_object,
    is_positive_integer,
};

/// Element type an array argument must be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
}

impl ElementKind {
    /// Whether `value` is an element of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ElementKind::String => value.is_string(),
            ElementKind::Number => value.is_number(),
            ElementKind::Integer => is_integer(value),
            ElementKind::Boolean => is_boolean(value),
            ElementKind::Object => is_object(value, false),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ElementKind::String => "string",
            ElementKind::Number => "number",
            ElementKind::Integer => "integer",
            ElementKind::Boolean => "boolean",
            ElementKind::Object => "object",
        }
    }
}

/// Build, log and return the validation error.
fn invalid(source: &str, label: &str, expected: impl Into<String>, value: &Value) -> PrepError {
    let expected = expected.into();
    let received = describe_value(value);
    tracing::error!(
        source = source,
        label = label,
        expected = %expected,
        received = %received,
        "invalid argument"
    );
    PrepError::InvalidArgument {
        source_tag: source.to_string(),
        label: label.to_string(),
        expected,
        received,
    }
}

/// Require a non-empty string.
pub fn string_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    if is_non_empty_string(value) {
        Ok(())
    } else {
        Err(invalid(source, label, "a non-empty string", value))
    }
}

/// Require a boolean.
pub fn boolean_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    if is_boolean(value) {
        Ok(())
    } else {
        Err(invalid(source, label, "a boolean", value))
    }
}

/// Require a JSON number.
pub fn numeric_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    if is_numeric(value, false) {
        Ok(())
    } else {
        Err(invalid(source, label, "a number", value))
    }
}

/// Require an integer.
pub fn integer_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    if is_integer(value) {
        Ok(())
    } else {
        Err(invalid(source, label, "an integer", value))
    }
}

/// Require an integer greater than zero.
pub fn positive_integer_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    if is_positive_integer(value) {
        Ok(())
    } else {
        Err(invalid(source, label, "a positive integer", value))
    }
}

/// Require a non-empty array, optionally of a single element kind.
pub fn array_argument(
    source: &str,
    label: &str,
    value: &Value,
    element: Option<ElementKind>,
) -> Result<()> {
    let expected = match element {
        Some(kind) => format!("a non-empty array of {} values", kind.label()),
        None => "a non-empty array".to_string(),
    };

    let Value::Array(items) = value else {
        return Err(invalid(source, label, expected, value));
    };
    if items.is_empty() {
        return Err(invalid(source, label, expected, value));
    }
    if let Some(kind) = element {
        if let Some(bad) = items.iter().find(|item| !kind.matches(item)) {
            return Err(invalid(source, label, expected, bad));
        }
    }
    Ok(())
}

/// Require a plain object, non-empty unless `allow_empty`.
pub fn object_argument(source: &str, label: &str, value: &Value, allow_empty: bool) -> Result<()> {
    if is_object(value, !allow_empty) {
        Ok(())
    } else if allow_empty {
        Err(invalid(source, label, "an object", value))
    } else {
        Err(invalid(source, label, "a non-empty object", value))
    }
}

/// Require a string that is one of `allowed`.
pub fn enum_argument(source: &str, label: &str, value: &Value, allowed: &[&str]) -> Result<()> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(invalid(
            source,
            label,
            format!("one of [{}]", allowed.join(", ")),
            value,
        )),
    }
}

/// Require a string path that exists.
pub fn existing_path_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    match value.as_str() {
        Some(p) if !p.trim().is_empty() && Path::new(p).exists() => Ok(()),
        _ => Err(invalid(source, label, "an existing path", value)),
    }
}

/// Require a string path to an existing file.
pub fn existing_file_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    match value.as_str() {
        Some(p) if !p.trim().is_empty() && Path::new(p).is_file() => Ok(()),
        _ => Err(invalid(source, label, "a path to an existing file", value)),
    }
}

/// Require a string path to an existing directory.
pub fn existing_directory_argument(source: &str, label: &str, value: &Value) -> Result<()> {
    match value.as_str() {
        Some(p) if !p.trim().is_empty() && Path::new(p).is_dir() => Ok(()),
        _ => Err(invalid(source, label, "a path to an existing directory", value)),
    }
}

/// Require every entry of `arguments` to be a non-empty string.
pub fn multiple_string_arguments(source: &str, arguments: &Map<String, Value>) -> Result<()> {
    for (label, value) in arguments {
        string_argument(source, label, value)?;
    }
    Ok(())
}

/// Extract the single `(label, value)` pair of a labeled argument object.
pub fn labeled_argument<'a>(source: &str, labeled: &'a Value) -> Result<(&'a str, &'a Value)> {
    let Value::Object(map) = labeled else {
        return Err(invalid(source, "labeled", "an object with exactly one key", labeled));
    };
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((label, value)), None) => Ok((label.as_str(), value)),
        _ => Err(invalid(
            source,
            "labeled",
            format!("an object with exactly one key (got {})", map.len()),
            labeled,
        )),
    }
}

/// Run a canonical validator on a single-key labeled object.
pub fn validate_labeled<F>(source: &str, labeled: &Value, validator: F) -> Result<()>
where
    F: FnOnce(&str, &str, &Value) -> Result<()>,
{
    let (label, value) = labeled_argument(source, labeled)?;
    validator(source, label, value)
}

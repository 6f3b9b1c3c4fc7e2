//! Type predicates over dynamic JSON values.
//!
//! Every predicate takes an arbitrary [`Value`] and answers a single
//! question about its shape. The argument validators build on these.

use serde_json::Value;

/// Maximum characters of a value preview in error messages.
const PREVIEW_LIMIT: usize = 60;

/// True iff `value` is a string with non-whitespace content.
pub fn is_non_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.trim().is_empty())
}

/// True iff `value` is a string that is empty after trimming.
pub fn is_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

/// True iff `value` is an array with at least one element.
pub fn is_non_empty_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty())
}

/// True iff `value` is an array with no elements.
pub fn is_empty_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if items.is_empty())
}

/// True iff `value` is a non-empty array of strings.
pub fn is_string_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_string))
}

/// True iff `value` is a number without a fractional part.
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
        }
        _ => false,
    }
}

/// True iff `value` is an integer greater than zero.
pub fn is_positive_integer(value: &Value) -> bool {
    is_integer(value) && value.as_f64().is_some_and(|f| f > 0.0)
}

/// True iff `value` is a non-empty array of integers.
pub fn is_integer_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(is_integer))
}

/// True iff `value` is a number, or (when allowed) a string holding one.
pub fn is_numeric(value: &Value, allow_numeric_strings: bool) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) if allow_numeric_strings => s
            .trim()
            .parse::<f64>()
            .is_ok_and(|f| f.is_finite()),
        _ => false,
    }
}

/// True iff `value` is a boolean.
pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// True iff `value` is a plain object (never an array).
///
/// With `require_non_empty` the object must also have at least one key.
pub fn is_object(value: &Value, require_non_empty: bool) -> bool {
    match value {
        Value::Object(map) => !require_non_empty || !map.is_empty(),
        _ => false,
    }
}

/// True iff `value` is a plain object with at least one key.
pub fn is_non_empty_object(value: &Value) -> bool {
    is_object(value, true)
}

/// True iff `value` is an object carrying all (or any) of `keys`.
pub fn has_keys(value: &Value, keys: &[&str], require_all: bool) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    if keys.is_empty() {
        return false;
    }
    if require_all {
        keys.iter().all(|k| map.contains_key(*k))
    } else {
        keys.iter().any(|k| map.contains_key(*k))
    }
}

/// True iff `value` carries no usable content.
///
/// Null, blank strings, empty arrays and empty objects are null-like.
/// Numbers and booleans never are.
pub fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// True iff any of `values` is null-like.
pub fn any_null<'a>(values: impl IntoIterator<Item = &'a Value>) -> bool {
    values.into_iter().any(is_null_like)
}

/// Name of the JSON type of `value`.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short `type: preview` description used in validation messages.
pub fn describe_value(value: &Value) -> String {
    let rendered = value.to_string();
    let preview: String = if rendered.chars().count() > PREVIEW_LIMIT {
        let head: String = rendered.chars().take(PREVIEW_LIMIT).collect();
        format!("{}...", head)
    } else {
        rendered
    };
    format!("({}) {}", type_name(value), preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_non_empty_string() {
        assert!(is_non_empty_string(&json!("abc")));
        assert!(is_non_empty_string(&json!("  a ")));
        assert!(!is_non_empty_string(&json!("")));
        assert!(!is_non_empty_string(&json!("   \t")));
        assert!(!is_non_empty_string(&json!(5)));
        assert!(!is_non_empty_string(&Value::Null));
    }

    #[test]
    fn test_integer_predicates() {
        assert!(is_integer(&json!(3)));
        assert!(is_integer(&json!(-3)));
        assert!(is_integer(&json!(4.0)));
        assert!(!is_integer(&json!(4.5)));
        assert!(!is_integer(&json!("4")));

        assert!(is_positive_integer(&json!(1)));
        assert!(!is_positive_integer(&json!(0)));
        assert!(!is_positive_integer(&json!(-2)));

        assert!(is_integer_array(&json!([1, 2, 3])));
        assert!(!is_integer_array(&json!([1, 2.5])));
        assert!(!is_integer_array(&json!([])));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(&json!(1.5), false));
        assert!(!is_numeric(&json!("1.5"), false));
        assert!(is_numeric(&json!(" 1.5 "), true));
        assert!(!is_numeric(&json!("abc"), true));
        assert!(!is_numeric(&json!("NaN"), true));
    }

    #[test]
    fn test_array_predicates() {
        assert!(is_string_array(&json!(["a", "b"])));
        assert!(!is_string_array(&json!(["a", 1])));
        assert!(!is_string_array(&json!([])));
        assert!(is_empty_array(&json!([])));
        assert!(is_non_empty_array(&json!([null])));
    }

    #[test]
    fn test_object_predicates() {
        assert!(is_object(&json!({}), false));
        assert!(!is_object(&json!({}), true));
        assert!(is_non_empty_object(&json!({"a": 1})));
        assert!(!is_non_empty_object(&json!([{"a": 1}])));

        let obj = json!({"a": 1, "b": 2});
        assert!(has_keys(&obj, &["a", "b"], true));
        assert!(!has_keys(&obj, &["a", "c"], true));
        assert!(has_keys(&obj, &["a", "c"], false));
        assert!(!has_keys(&obj, &[], false));
    }

    #[test]
    fn test_null_like() {
        assert!(is_null_like(&Value::Null));
        assert!(is_null_like(&json!(" ")));
        assert!(is_null_like(&json!([])));
        assert!(is_null_like(&json!({})));
        assert!(!is_null_like(&json!(0)));
        assert!(!is_null_like(&json!(false)));

        let values = [json!("a"), json!(""), json!(1)];
        assert!(any_null(&values));
        assert!(!any_null(&values[..1]));
    }

    #[test]
    fn test_describe_value_truncates() {
        let long = Value::String("x".repeat(200));
        let described = describe_value(&long);
        assert!(described.starts_with("(string) \"xxx"));
        assert!(described.ends_with("..."));
        assert_eq!(describe_value(&json!(5)), "(number) 5");
    }
}

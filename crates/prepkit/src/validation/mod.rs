//! Runtime type predicates and argument validators.

mod arguments;
mod predicates;

pub use arguments::{
    array_argument, boolean_argument, enum_argument, existing_directory_argument,
    existing_file_argument, existing_path_argument, integer_argument, labeled_argument,
    multiple_string_arguments, numeric_argument, object_argument, positive_integer_argument,
    string_argument, validate_labeled, ElementKind,
};
pub use predicates::{
    any_null, describe_value, has_keys, is_boolean, is_empty_array, is_empty_string, is_integer,
    is_integer_array, is_non_empty_array, is_non_empty_object, is_non_empty_string, is_null_like,
    is_numeric, is_object, is_positive_integer, is_string_array, type_name,
};

//! String cleaning, comparison and entity extraction.

mod clean;
mod compare;
mod contact;
mod entity;

pub use clean::{
    apply_case, apply_replacements, clean, ends_with_abbreviation, normalize_whitespace, pad,
    strip, to_title_case, CaseOptions, CleanOptions, PadOptions, PadSide, ReplaceRule,
    SearchValue, StripCondition, StripOptions, StripPredicate,
};
pub use compare::{contains_any_of, ends_with_any_of, equivalent_alphanumeric, starts_with_any_of};
pub use contact::{
    extract_email, extract_emails, extract_phone, extract_phones, is_valid_email, PhoneNumber,
    PhonePattern, PhoneRegion, PHONE_PATTERNS,
};
pub use entity::{extract_sku, EntityExtractor, JobTitleSuffix, PersonName};

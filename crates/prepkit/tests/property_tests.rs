//! Property-based tests for predicates, cleaning and extraction.
//!
//! Property-based tests verify:
//! 1. **No panics**: extractors never crash on any input
//! 2. **Idempotence**: cleaning a cleaned string changes nothing
//! 3. **Invariants**: predicates agree with their definitions
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p prepkit --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::Value;

use prepkit::config::RegexConstants;
use prepkit::text::{
    clean, extract_email, extract_phone, extract_sku, normalize_whitespace, CaseOptions,
    CleanOptions, EntityExtractor, PadOptions, PhoneRegion, PHONE_PATTERNS,
};
use prepkit::validation::{is_non_empty_string, is_null_like};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary ASCII strings (common case)
fn ascii_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-\\.,;:!?\\s]{0,100}"
}

/// Strings that look like names
fn name_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{3,12} [A-Z][a-z]{3,12}",
        "[A-Z][a-z]{3,12}, [A-Z][a-z]{3,12}",
        "[A-Z][a-z]{3,12} [A-Z]\\. [A-Z][a-z]{3,12}",
        "(Mr|Ms|Dr)\\. [A-Z][a-z]{3,12} [A-Z][a-z]{3,12}",
    ]
}

fn extractor() -> EntityExtractor {
    let constants = RegexConstants {
        company_keyword_list: vec!["Inc".into(), "LLC".into()],
        job_title_suffix_list: vec!["MD".into(), "PhD".into()],
    };
    EntityExtractor::new(&constants).unwrap()
}

// =============================================================================
// Predicate Properties
// =============================================================================

proptest! {
    #[test]
    fn non_empty_string_iff_trimmed_non_empty(s in any::<String>()) {
        let value = Value::String(s.clone());
        prop_assert_eq!(is_non_empty_string(&value), !s.trim().is_empty());
    }

    #[test]
    fn numbers_are_never_non_empty_strings(n in any::<i64>()) {
        prop_assert!(!is_non_empty_string(&Value::from(n)));
        prop_assert!(!is_null_like(&Value::from(n)));
    }
}

// =============================================================================
// Clean Properties
// =============================================================================

proptest! {
    #[test]
    fn clean_upper_is_idempotent(s in ascii_string()) {
        let options = CleanOptions::default().with_case(CaseOptions::Upper);
        let once = clean(&s, &options);
        prop_assert_eq!(clean(&once, &options), once);
    }

    #[test]
    fn normalized_has_no_double_spaces(s in ascii_string()) {
        let normalized = normalize_whitespace(&s);
        prop_assert!(!normalized.contains("  "));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn pad_reaches_length(s in "[a-z0-9]{0,10}", length in 0usize..20) {
        let options = CleanOptions::none().with_pad(PadOptions::left(length, '0'));
        let padded = clean(&s, &options);
        prop_assert_eq!(padded.chars().count(), length.max(s.chars().count()));
        prop_assert!(padded.ends_with(&s));
    }
}

// =============================================================================
// Extraction Properties
// =============================================================================

proptest! {
    #[test]
    fn extractors_never_panic(s in any::<String>()) {
        let ex = extractor();
        let _ = ex.extract_name(&s);
        let _ = ex.extract_job_title_suffix(&s);
        let _ = extract_phone(&s);
        let _ = extract_email(&s);
        let _ = extract_sku(&s);
    }

    #[test]
    fn phone_region_is_first_matching_pattern(digits in "\\+?[0-9]{7,14}") {
        if let Some(phone) = extract_phone(&digits) {
            let first = PHONE_PATTERNS
                .iter()
                .find(|p| p.regex.is_match(&digits))
                .map(|p| p.region);
            prop_assert_eq!(Some(phone.region), first);
        }
    }

    #[test]
    fn korean_mobile_is_korea(rest in "[0-9]{8}") {
        let phone = extract_phone(&format!("8210{}", rest)).unwrap();
        prop_assert_eq!(phone.region, PhoneRegion::Korea);
    }

    #[test]
    fn name_like_inputs_extract(s in name_like()) {
        let name = extractor().extract_name(&s);
        prop_assert!(name.is_some());
        let name = name.unwrap();
        prop_assert!(!name.first.is_empty());
        prop_assert!(!name.last.is_empty());
    }
}

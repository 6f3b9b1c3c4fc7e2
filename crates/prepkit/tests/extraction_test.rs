//! Integration tests for cleaning and entity extraction.

use serde_json::json;

use prepkit::config::RegexConstants;
use prepkit::text::{
    clean, extract_email, extract_emails, extract_phone, extract_sku, CaseOptions, CleanOptions,
    EntityExtractor, PadOptions, PersonName, PhoneRegion, ReplaceRule, StripCondition,
    StripOptions,
};
use prepkit::validation::{
    labeled_argument, multiple_string_arguments, string_argument, validate_labeled,
};
use prepkit::PrepError;

fn extractor() -> EntityExtractor {
    let constants: RegexConstants = serde_json::from_value(json!({
        "COMPANY_KEYWORD_LIST": ["Inc", "LLC", "Hospital", "Group"],
        "JOB_TITLE_SUFFIX_LIST": ["MD", "PhD", "RN", "Jr."]
    }))
    .expect("valid constants");
    EntityExtractor::new(&constants).expect("extractor builds")
}

// =============================================================================
// Name Extraction Tests
// =============================================================================

#[test]
fn test_extract_name_orders() {
    let ex = extractor();
    assert_eq!(ex.extract_name("John A. Doe"), Some(PersonName::new("John", "A.", "Doe")));
    assert_eq!(ex.extract_name("Doe, John"), Some(PersonName::new("John", "", "Doe")));
}

#[test]
fn test_extract_name_with_credentials() {
    let ex = extractor();
    let name = ex.extract_name("Dr. Jane Roe, MD, PhD").unwrap();
    assert_eq!(name.first, "Jane");
    assert_eq!(name.last, "Roe, MD, PhD");
}

#[test]
fn test_extract_name_rejects_organizations() {
    let ex = extractor();
    assert_eq!(ex.extract_name("St. Mary Hospital"), None);
    assert_eq!(ex.extract_name("Blue Sky Group"), None);
}

// =============================================================================
// Contact Extraction Tests
// =============================================================================

#[test]
fn test_phone_precedence() {
    let phone = extract_phone("821012345678").unwrap();
    assert_eq!(phone.region, PhoneRegion::Korea);
    assert_eq!(phone.formatted, "+82 10-1234-5678");
}

#[test]
fn test_contact_line() {
    let line = "Jane Roe <Jane.Roe@Example.com>, tel (555) 867-5309";
    assert_eq!(extract_email(line).as_deref(), Some("jane.roe@example.com"));
    assert_eq!(extract_phone(line).unwrap().formatted, "(555) 867-5309");
    assert_eq!(extract_emails("a@x.io; A@X.io, b@y.io"), vec!["a@x.io", "b@y.io"]);
}

#[test]
fn test_extract_sku_from_description() {
    assert_eq!(extract_sku("sku: wx-220 replacement blade").as_deref(), Some("WX-220"));
    assert_eq!(extract_sku("Replacement blade"), None);
}

// =============================================================================
// Clean Pipeline Tests
// =============================================================================

#[test]
fn test_clean_pipeline_order() {
    let options = CleanOptions::default()
        .with_replace(ReplaceRule::literal("#", ""))
        .with_strip(StripOptions::new("0").with_right(StripCondition::Never))
        .with_case(CaseOptions::Upper)
        .with_pad(PadOptions::left(6, '0'));

    assert_eq!(clean("  #00ab   12 ", &options), "0AB 12");
    assert_eq!(clean("#7", &options), "000007");
}

#[test]
fn test_clean_upper_idempotent() {
    let options = CleanOptions::default().with_case(CaseOptions::Upper);
    let once = clean("  mixed   Case ,value ", &options);
    assert_eq!(once, "MIXED CASE,VALUE");
    assert_eq!(clean(&once, &options), once);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validation_messages() {
    let err = string_argument("contacts.load", "fileName", &json!(42)).unwrap_err();
    assert!(matches!(err, PrepError::InvalidArgument { .. }));
    assert!(err
        .to_string()
        .starts_with("[contacts.load] Invalid argument: 'fileName' - Expected"));

    let labeled = json!({"sheetName": "Sheet1"});
    assert_eq!(labeled_argument("x", &labeled).unwrap().0, "sheetName");
    assert!(validate_labeled("x", &labeled, string_argument).is_ok());
    assert!(labeled_argument("x", &json!({"a": "1", "b": "2"})).is_err());

    let args = json!({"first": "Jane", "last": " "});
    let err = multiple_string_arguments("x", args.as_object().unwrap()).unwrap_err();
    assert!(err.to_string().contains("'last'"));
}

//! Phone number and email extraction.
//!
//! Phone candidates are located in free text, reduced to their digits
//! (plus an optional leading `+` and extension), then matched against
//! [`PHONE_PATTERNS`] in declared order. The first pattern that matches
//! decides the region and the formatting.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Region a phone pattern recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneRegion {
    Korea,
    HongKong,
    China,
    Japan,
    /// North American style ten-digit number, optional leading `1`.
    Generic,
}

/// A phone pattern and the template used to format its groups.
#[derive(Debug)]
pub struct PhonePattern {
    pub region: PhoneRegion,
    pub regex: Regex,
    pub template: &'static str,
}

/// Phone patterns in precedence order. Matched against compacted digits.
pub static PHONE_PATTERNS: Lazy<Vec<PhonePattern>> = Lazy::new(|| {
    vec![
        PhonePattern {
            region: PhoneRegion::Korea,
            regex: Regex::new(r"^\+?820?(1[016789]|2|[3-6]\d)(\d{3,4})(\d{4})$").unwrap(),
            template: "+82 $1-$2-$3",
        },
        PhonePattern {
            region: PhoneRegion::HongKong,
            regex: Regex::new(r"^\+?852([2-9]\d{3})(\d{4})$").unwrap(),
            template: "+852 $1 $2",
        },
        PhonePattern {
            region: PhoneRegion::China,
            regex: Regex::new(r"^\+?86(1[3-9]\d)(\d{4})(\d{4})$").unwrap(),
            template: "+86 $1 $2 $3",
        },
        PhonePattern {
            region: PhoneRegion::Japan,
            regex: Regex::new(r"^\+?810?([1-9]\d?)(\d{4})(\d{4})$").unwrap(),
            template: "+81 $1-$2-$3",
        },
        PhonePattern {
            region: PhoneRegion::Generic,
            regex: Regex::new(r"^\+?1?(\d{3})(\d{3})(\d{4})$").unwrap(),
            template: "($1) $2-$3",
        },
    ]
});

/// Phone-shaped run of text: digits with common separators and an optional
/// extension.
static PHONE_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\+?\(?\d[\d\s().\-]{5,}\d(?:\s*(?:ext\.?|extension|x|#)\s*\d{1,6})?").unwrap()
});

static EXTENSION_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(?:ext\.?|extension|x|#)\s*").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}").unwrap()
});

static EMAIL_EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}$").unwrap()
});

// =============================================================================
// PHONE
// =============================================================================

/// A recognized phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Region of the first pattern that matched.
    pub region: PhoneRegion,
    /// Number rendered with the pattern's template (and extension).
    pub formatted: String,
    /// Digits of the main number, without `+` or extension.
    pub digits: String,
    pub extension: Option<String>,
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Split a candidate into `+digits` and an optional extension.
fn compact_phone(candidate: &str) -> (String, Option<String>) {
    let (main, extension) = match EXTENSION_MARK.find(candidate) {
        Some(m) if m.start() > 0 => {
            let ext: String = candidate[m.end()..]
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            (&candidate[..m.start()], (!ext.is_empty()).then_some(ext))
        }
        _ => (candidate, None),
    };

    let mut compact = String::with_capacity(main.len());
    if main.trim_start().starts_with('+') {
        compact.push('+');
    }
    compact.extend(main.chars().filter(char::is_ascii_digit));
    (compact, extension)
}

/// Match compacted digits against [`PHONE_PATTERNS`], first match wins.
fn match_phone(compact: &str, extension: Option<String>) -> Option<PhoneNumber> {
    let pattern = PHONE_PATTERNS.iter().find(|p| p.regex.is_match(compact))?;
    let mut formatted = pattern.regex.replace(compact, pattern.template).into_owned();
    if let Some(ext) = &extension {
        formatted.push_str(" ext. ");
        formatted.push_str(ext);
    }
    Some(PhoneNumber {
        region: pattern.region,
        formatted,
        digits: compact.trim_start_matches('+').to_string(),
        extension,
    })
}

/// Byte offsets where a digit group ends, longest prefix first.
fn digit_group_ends(candidate: &str) -> Vec<usize> {
    let bytes = candidate.as_bytes();
    let mut ends: Vec<usize> = (1..bytes.len())
        .filter(|&i| bytes[i - 1].is_ascii_digit() && !bytes[i].is_ascii_digit())
        .collect();
    ends.push(bytes.len());
    ends.reverse();
    ends
}

/// Match a candidate, dropping trailing digit groups (`2024`, `2nd`) until a
/// pattern fits. Returns the number and the bytes of `candidate` it used.
fn match_candidate(candidate: &str) -> Option<(PhoneNumber, usize)> {
    digit_group_ends(candidate).into_iter().find_map(|end| {
        let (compact, extension) = compact_phone(&candidate[..end]);
        match_phone(&compact, extension).map(|phone| (phone, end))
    })
}

/// Phone numbers of `s` in order of appearance. Scanning resumes right
/// after the part of a candidate that matched.
fn phones(s: &str) -> impl Iterator<Item = PhoneNumber> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        while let Some(m) = PHONE_CANDIDATE.find_at(s, pos) {
            match match_candidate(m.as_str()) {
                Some((phone, used)) => {
                    pos = m.start() + used;
                    return Some(phone);
                }
                None => pos = m.end(),
            }
        }
        None
    })
}

/// Extract the first recognizable phone number from `s`.
///
/// # Example
///
/// ```
/// use prepkit::text::{extract_phone, PhoneRegion};
///
/// let phone = extract_phone("821012345678").unwrap();
/// assert_eq!(phone.region, PhoneRegion::Korea);
/// assert_eq!(phone.formatted, "+82 10-1234-5678");
/// ```
pub fn extract_phone(s: &str) -> Option<PhoneNumber> {
    phones(s).next()
}

/// Extract every recognizable phone number from `s`, in order of appearance.
pub fn extract_phones(s: &str) -> Vec<PhoneNumber> {
    phones(s).collect()
}

// =============================================================================
// EMAIL
// =============================================================================

/// True when the whole of `s` (trimmed) is an email address.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_EXACT.is_match(s.trim())
}

/// Extract the first email address in `s`, lowercased.
pub fn extract_email(s: &str) -> Option<String> {
    EMAIL.find(s).map(|m| m.as_str().to_lowercase())
}

/// Extract every email address in `s`, lowercased, without duplicates.
pub fn extract_emails(s: &str) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for m in EMAIL.find_iter(s) {
        let email = m.as_str().to_lowercase();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }
    emails
}

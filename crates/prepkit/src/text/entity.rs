//! Name, job-title suffix, company keyword and SKU extraction.
//!
//! The keyword-driven patterns come from [`RegexConstants`] and are compiled
//! once when an [`EntityExtractor`] is built. The extractor is immutable, so
//! one instance can be shared by every caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::RegexConstants;
use crate::error::Result;

use super::clean::normalize_whitespace;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static SALUTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:mr|mrs|ms|miss|mx|dr|prof)\.?\s+").unwrap());

/// `Last, First [Middle...]` with exactly one comma.
static LAST_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<last>[^,]+),\s*(?P<given>[^,]+)$").unwrap());

static DIGIT_OR_AT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d@]").unwrap());

static SUFFIX_TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").unwrap());

static LABELED_SKU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:sku|item|part|model)\s*(?:#|no\.?|number)?\s*[:#]?\s*([a-z0-9][a-z0-9\-_./]*[a-z0-9])",
    )
    .unwrap()
});

static LEADING_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9]+(?:[\-_.][A-Za-z0-9]+)+|[A-Za-z]+\d[A-Za-z0-9]*)(?:\s|:|$)").unwrap()
});

/// Lowercase surname particles that belong with the last name.
const SURNAME_PARTICLES: &[&str] = &[
    "van", "von", "de", "da", "del", "della", "der", "di", "du", "la", "le", "st", "st.",
];

// =============================================================================
// TYPES
// =============================================================================

/// A person's name split into parts. Missing parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub middle: String,
    pub last: String,
}

impl PersonName {
    /// Create a name from its parts.
    pub fn new(first: impl Into<String>, middle: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            middle: middle.into(),
            last: last.into(),
        }
    }

    /// Parts joined with single spaces, skipping empty ones.
    pub fn full_name(&self) -> String {
        [&self.first, &self.middle, &self.last]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Trailing credential list found on a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTitleSuffix {
    /// Canonical list entries joined by `", "`.
    pub suffix: String,
    /// Text before the credential list, trimmed of trailing commas.
    pub remainder: String,
}

/// Compiled keyword-driven extraction patterns.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    company_keywords: Option<Regex>,
    job_title_suffix: Option<Regex>,
    /// `(lookup key, canonical entry)` for each configured suffix.
    suffix_lookup: Vec<(String, String)>,
}

/// Uppercased key with periods and whitespace removed (`"Ph.D."` → `"PHD"`).
fn suffix_key(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Regex for one credential with optional periods between letters.
fn suffix_token_pattern(entry: &str) -> Option<String> {
    let chars: Vec<char> = entry.chars().filter(|c| *c != '.' && !c.is_whitespace()).collect();
    if chars.is_empty() {
        return None;
    }
    Some(
        chars
            .iter()
            .map(|c| format!(r"{}\.?", regex::escape(&c.to_string())))
            .collect(),
    )
}

impl EntityExtractor {
    /// Compile patterns from the loaded constants.
    pub fn new(constants: &RegexConstants) -> Result<Self> {
        let keywords: Vec<String> = constants
            .company_keyword_list
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        let company_keywords = if keywords.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)(?:^|[^\p{{L}}\p{{N}}])(?:{})(?:$|[^\p{{L}}\p{{N}}])",
                keywords.join("|")
            ))?)
        };

        let mut entries: Vec<&String> = constants.job_title_suffix_list.iter().collect();
        // Longer credentials first so `MDS` is tried before `MD`.
        entries.sort_by_key(|e| std::cmp::Reverse(suffix_key(e).len()));

        let tokens: Vec<String> = entries.iter().filter_map(|e| suffix_token_pattern(e)).collect();
        let job_title_suffix = if tokens.is_empty() {
            None
        } else {
            let token = format!("(?:{})", tokens.join("|"));
            Some(Regex::new(&format!(
                r"(?i)(?P<sep>\s*,\s*|\s+)(?P<list>{token}(?:(?:\s*,\s*|\s+){token})*)\s*$"
            ))?)
        };

        let suffix_lookup = constants
            .job_title_suffix_list
            .iter()
            .map(|entry| (suffix_key(entry), entry.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Ok(Self {
            company_keywords,
            job_title_suffix,
            suffix_lookup,
        })
    }

    fn canonical_suffix(&self, token: &str) -> String {
        let key = suffix_key(token);
        self.suffix_lookup
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or_else(|| token.to_string())
    }

    /// True when `s` contains a company keyword as a whole word.
    pub fn contains_company_keyword(&self, s: &str) -> bool {
        self.company_keywords
            .as_ref()
            .is_some_and(|re| re.is_match(s))
    }

    /// True when `token` is spelled like a configured credential (case
    /// included, periods ignored) or is written dotted (`D.O.`).
    fn written_as_credential(&self, token: &str) -> bool {
        token.contains('.')
            || self
                .suffix_lookup
                .iter()
                .any(|(_, canonical)| canonical.replace('.', "") == token)
    }

    /// Find a trailing credential list such as `", MD, PhD"` or `" M.D."`.
    ///
    /// A credential that follows plain whitespace must be spelled as
    /// configured or dotted, so `"Mary Jo Do"` keeps its surname while
    /// `"John Doe DO"` does not. A list introduced only by whitespace also
    /// needs at least two words before it. A lone comma-separated token after
    /// a single word (`"Smith, Do"`) reads as a given name, not a credential.
    pub fn extract_job_title_suffix(&self, s: &str) -> Option<JobTitleSuffix> {
        let re = self.job_title_suffix.as_ref()?;
        let trimmed = s.trim();
        let caps = re.captures(trimmed)?;
        let list = caps.name("list")?;

        // (comma before, start in `trimmed`, token)
        let mut tokens: Vec<(bool, usize, &str)> = Vec::new();
        let mut comma_before = caps.name("sep").is_some_and(|m| m.as_str().contains(','));
        let mut token_start = 0;
        for sep in SUFFIX_TOKEN_SPLIT.find_iter(list.as_str()) {
            let token = &list.as_str()[token_start..sep.start()];
            tokens.push((comma_before, list.start() + token_start, token));
            comma_before = sep.as_str().contains(',');
            token_start = sep.end();
        }
        let token = &list.as_str()[token_start..];
        tokens.push((comma_before, list.start() + token_start, token));

        let keep_from = tokens
            .iter()
            .rposition(|(comma, _, token)| !comma && !self.written_as_credential(token))
            .map_or(0, |i| i + 1);
        let kept = tokens.get(keep_from..).filter(|kept| !kept.is_empty())?;
        let (comma_separated, list_start, _) = kept[0];

        let remainder = trimmed[..list_start]
            .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
            .to_string();
        if remainder.is_empty() {
            return None;
        }
        let remainder_words = remainder.split_whitespace().count();
        if !comma_separated && remainder_words < 2 {
            return None;
        }
        if comma_separated && kept.len() == 1 && remainder_words == 1 && !remainder.contains(',') {
            return None;
        }

        let suffix = kept
            .iter()
            .map(|(_, _, token)| self.canonical_suffix(token))
            .collect::<Vec<_>>()
            .join(", ");

        Some(JobTitleSuffix { suffix, remainder })
    }

    /// Split a person's name into first, middle and last parts.
    ///
    /// Returns `None` for blank input and for strings that do not look like a
    /// person: anything with digits, an `@`, or a company keyword.
    ///
    /// # Example
    ///
    /// ```
    /// use prepkit::config::RegexConstants;
    /// use prepkit::text::{EntityExtractor, PersonName};
    ///
    /// let extractor = EntityExtractor::new(&RegexConstants::default()).unwrap();
    /// assert_eq!(
    ///     extractor.extract_name("John A. Doe"),
    ///     Some(PersonName::new("John", "A.", "Doe"))
    /// );
    /// assert_eq!(
    ///     extractor.extract_name("Doe, John"),
    ///     Some(PersonName::new("John", "", "Doe"))
    /// );
    /// ```
    pub fn extract_name(&self, s: &str) -> Option<PersonName> {
        let normalized = normalize_whitespace(s);
        let without_salutation = SALUTATION.replace(&normalized, "");

        let (body, suffix) = match self.extract_job_title_suffix(&without_salutation) {
            Some(found) => (found.remainder, Some(found.suffix)),
            None => (without_salutation.into_owned(), None),
        };
        let body = body.trim_matches(|c: char| c == ',' || c.is_whitespace());

        if body.is_empty() || DIGIT_OR_AT.is_match(body) || self.contains_company_keyword(body) {
            return None;
        }

        let mut name = match LAST_FIRST.captures(body) {
            Some(caps) => {
                let mut given = caps["given"].split_whitespace();
                PersonName {
                    first: given.next().unwrap_or_default().to_string(),
                    middle: given.collect::<Vec<_>>().join(" "),
                    last: caps["last"].trim().to_string(),
                }
            }
            None => split_on_whitespace(&body.replace(',', " ")),
        };

        if let Some(suffix) = suffix {
            if name.last.is_empty() {
                name.last = suffix;
            } else if !name.last.to_lowercase().ends_with(&suffix.to_lowercase()) {
                name.last = format!("{}, {}", name.last, suffix);
            }
        }

        Some(name)
    }
}

/// `First [Middle...] [particles] Last` split of a comma-free name.
fn split_on_whitespace(body: &str) -> PersonName {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    match tokens.len() {
        0 => PersonName::default(),
        1 => PersonName::new(tokens[0], "", ""),
        n => {
            let mut last_start = n - 1;
            while last_start > 1 && SURNAME_PARTICLES.contains(&tokens[last_start - 1]) {
                last_start -= 1;
            }
            PersonName::new(
                tokens[0],
                tokens[1..last_start].join(" "),
                tokens[last_start..].join(" "),
            )
        }
    }
}

/// Extract a product SKU.
///
/// A labeled code (`SKU: AB-12`, `Item #4471`, `Part No. X-9`) wins over a
/// leading code token (`AB-1234 Widget`, `WID123 : Blue`). Codes must contain
/// a digit. The result is uppercased.
pub fn extract_sku(s: &str) -> Option<String> {
    let labeled = LABELED_SKU
        .captures_iter(s)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|code| code.chars().any(|c| c.is_ascii_digit()));
    if let Some(code) = labeled {
        return Some(code.to_uppercase());
    }

    LEADING_CODE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|code| code.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_uppercase)
}

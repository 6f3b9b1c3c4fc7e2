//! String cleaning pipeline.
//!
//! [`clean`] composes five stages, each skipped when its option is absent:
//!
//! 1. default collapse ([`normalize_whitespace`]) when `use_default` is set
//! 2. replace rules ([`apply_replacements`])
//! 3. conditional strip ([`strip`])
//! 4. case transform ([`apply_case`])
//! 5. pad ([`pad`])
//!
//! # Example
//!
//! ```
//! use prepkit::text::{clean, CaseOptions, CleanOptions, StripOptions};
//!
//! let options = CleanOptions::default()
//!     .with_strip(StripOptions::new("."))
//!     .with_case(CaseOptions::Upper);
//! assert_eq!(clean("  acme   widgets... ", &options), "ACME WIDGETS");
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,;:!?])").unwrap());

/// Abbreviations, titles and dotted initialisms whose trailing period belongs
/// to the word.
static TRAILING_ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z])(?:inc|co|corp|ltd|llc|jr|sr|st|dr|mr|mrs|ms|bros|esq|no|dept|(?:[a-z]\.)*[a-z])\.$",
    )
    .unwrap()
});

// =============================================================================
// OPTIONS
// =============================================================================

/// What a replace rule searches for.
#[derive(Debug, Clone)]
pub enum SearchValue {
    /// Plain text; every occurrence is replaced.
    Literal(String),
    /// Regular expression; `$1`-style group references work in the replacement.
    Pattern(Regex),
}

/// One substitution rule.
#[derive(Debug, Clone)]
pub struct ReplaceRule {
    pub search: SearchValue,
    pub replacement: String,
}

impl ReplaceRule {
    /// Replace every occurrence of `search` with `replacement`.
    pub fn literal(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            search: SearchValue::Literal(search.into()),
            replacement: replacement.into(),
        }
    }

    /// Replace every match of the regex `pattern` with `replacement`.
    pub fn pattern(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            search: SearchValue::Pattern(Regex::new(pattern)?),
            replacement: replacement.into(),
        })
    }

    /// Apply this rule to `s`.
    pub fn apply(&self, s: &str) -> String {
        match &self.search {
            SearchValue::Literal(needle) if needle.is_empty() => s.to_string(),
            SearchValue::Literal(needle) => s.replace(needle.as_str(), &self.replacement),
            SearchValue::Pattern(re) => re.replace_all(s, self.replacement.as_str()).into_owned(),
        }
    }
}

/// Predicate deciding whether a side of the current string gets stripped.
pub type StripPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// When one side of a string is stripped.
#[derive(Clone, Default)]
pub enum StripCondition {
    #[default]
    Always,
    Never,
    /// Strip only when the predicate holds for the current string.
    When(StripPredicate),
}

impl StripCondition {
    /// Strip when `predicate` returns true for the current string.
    pub fn when(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        StripCondition::When(Arc::new(predicate))
    }

    fn applies(&self, current: &str) -> bool {
        match self {
            StripCondition::Always => true,
            StripCondition::Never => false,
            StripCondition::When(predicate) => predicate(current),
        }
    }
}

impl fmt::Debug for StripCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StripCondition::Always => write!(f, "Always"),
            StripCondition::Never => write!(f, "Never"),
            StripCondition::When(_) => write!(f, "When(<predicate>)"),
        }
    }
}

#[derive(Debug, Clone)]
enum StripTarget {
    Literal(String),
    Pattern { leading: Regex, trailing: Regex },
}

/// Conditional trim of a character (or pattern) from either side.
#[derive(Debug, Clone)]
pub struct StripOptions {
    target: StripTarget,
    /// Condition for the left side.
    pub left: StripCondition,
    /// Condition for the right side, evaluated after the left side ran.
    pub right: StripCondition,
}

impl StripOptions {
    /// Strip runs of the literal `target` from both sides.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: StripTarget::Literal(target.into()),
            left: StripCondition::Always,
            right: StripCondition::Always,
        }
    }

    /// Strip runs of the regex fragment `pattern` from both sides.
    ///
    /// The fragment is used unescaped, so `[.,;]` strips any of those marks.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            target: StripTarget::Pattern {
                leading: Regex::new(&format!(r"^(?:{})+", pattern))?,
                trailing: Regex::new(&format!(r"(?:{})+$", pattern))?,
            },
            left: StripCondition::Always,
            right: StripCondition::Always,
        })
    }

    /// Set the left-side condition.
    pub fn with_left(mut self, condition: StripCondition) -> Self {
        self.left = condition;
        self
    }

    /// Set the right-side condition.
    pub fn with_right(mut self, condition: StripCondition) -> Self {
        self.right = condition;
        self
    }

    fn strip_leading<'a>(&self, s: &'a str) -> &'a str {
        match &self.target {
            StripTarget::Literal(t) if t.is_empty() => s,
            StripTarget::Literal(t) => s.trim_start_matches(t.as_str()),
            StripTarget::Pattern { leading, .. } => match leading.find(s) {
                Some(m) => &s[m.end()..],
                None => s,
            },
        }
    }

    fn strip_trailing<'a>(&self, s: &'a str) -> &'a str {
        match &self.target {
            StripTarget::Literal(t) if t.is_empty() => s,
            StripTarget::Literal(t) => s.trim_end_matches(t.as_str()),
            StripTarget::Pattern { trailing, .. } => match trailing.find(s) {
                Some(m) => &s[..m.start()],
                None => s,
            },
        }
    }
}

/// Case transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOptions {
    Upper,
    Lower,
    /// Capitalize the first letter of every word, lowercase the rest.
    Title,
}

/// Which side padding goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadSide {
    #[default]
    Left,
    Right,
}

/// Pad to a minimum character count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadOptions {
    pub length: usize,
    pub fill: char,
    pub side: PadSide,
}

impl PadOptions {
    /// Left-pad to `length` with `fill`.
    pub fn left(length: usize, fill: char) -> Self {
        Self {
            length,
            fill,
            side: PadSide::Left,
        }
    }

    /// Right-pad to `length` with `fill`.
    pub fn right(length: usize, fill: char) -> Self {
        Self {
            length,
            fill,
            side: PadSide::Right,
        }
    }
}

/// Ordered set of transformations for [`clean`].
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub strip: Option<StripOptions>,
    pub case: Option<CaseOptions>,
    pub pad: Option<PadOptions>,
    pub replace: Vec<ReplaceRule>,
    /// Collapse whitespace and tidy punctuation spacing first.
    pub use_default: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            strip: None,
            case: None,
            pad: None,
            replace: Vec::new(),
            use_default: true,
        }
    }
}

impl CleanOptions {
    /// Options with every stage disabled, including the default collapse.
    pub fn none() -> Self {
        Self {
            use_default: false,
            ..Self::default()
        }
    }

    pub fn with_strip(mut self, strip: StripOptions) -> Self {
        self.strip = Some(strip);
        self
    }

    pub fn with_case(mut self, case: CaseOptions) -> Self {
        self.case = Some(case);
        self
    }

    pub fn with_pad(mut self, pad: PadOptions) -> Self {
        self.pad = Some(pad);
        self
    }

    pub fn with_replace(mut self, rule: ReplaceRule) -> Self {
        self.replace.push(rule);
        self
    }
}

// =============================================================================
// STAGES
// =============================================================================

/// Collapse whitespace runs, drop spaces before `, ; : ! ?`, and trim.
pub fn normalize_whitespace(s: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(s, " ");
    let tidied = SPACE_BEFORE_PUNCTUATION.replace_all(&collapsed, "$1");
    tidied.trim().to_string()
}

/// Apply replace rules in order.
pub fn apply_replacements(s: &str, rules: &[ReplaceRule]) -> String {
    rules
        .iter()
        .fold(s.to_string(), |current, rule| rule.apply(&current))
}

/// Strip the target from each side whose condition holds.
///
/// Conditions see the current string: the right condition is evaluated after
/// the left side has been handled. Whitespace exposed by stripping is trimmed.
pub fn strip(s: &str, options: &StripOptions) -> String {
    let mut current = s.trim().to_string();

    if options.left.applies(&current) {
        current = options.strip_leading(&current).trim_start().to_string();
    }
    if options.right.applies(&current) {
        current = options.strip_trailing(&current).trim_end().to_string();
    }

    current
}

/// Apply a case transform.
pub fn apply_case(s: &str, case: CaseOptions) -> String {
    match case {
        CaseOptions::Upper => s.to_uppercase(),
        CaseOptions::Lower => s.to_lowercase(),
        CaseOptions::Title => to_title_case(s),
    }
}

/// Capitalize the first letter of each word and lowercase the rest.
///
/// An apostrophe inside a word does not start a new one (`O'neil`, `Don't`).
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for ch in s.chars() {
        if ch.is_alphanumeric() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = in_word && ch == '\'';
        }
    }

    out
}

/// Pad to `options.length` characters.
pub fn pad(s: &str, options: &PadOptions) -> String {
    let count = s.chars().count();
    if count >= options.length {
        return s.to_string();
    }
    let fill: String = std::iter::repeat_n(options.fill, options.length - count).collect();
    match options.side {
        PadSide::Left => format!("{}{}", fill, s),
        PadSide::Right => format!("{}{}", s, fill),
    }
}

/// Run the cleaning pipeline.
pub fn clean(s: &str, options: &CleanOptions) -> String {
    let mut result = if options.use_default {
        normalize_whitespace(s)
    } else {
        s.to_string()
    };

    if !options.replace.is_empty() {
        result = apply_replacements(&result, &options.replace);
    }
    if let Some(strip_options) = &options.strip {
        result = strip(&result, strip_options);
    }
    if let Some(case) = options.case {
        result = apply_case(&result, case);
    }
    if let Some(pad_options) = &options.pad {
        result = pad(&result, pad_options);
    }

    result
}

/// True when `s` ends in an abbreviation whose period should be kept.
///
/// Covers business/title abbreviations (`Inc.`, `Co.`, `Jr.`, `Dr.`) and
/// dotted initials (`A.`, `M.D.`, `U.S.A.`).
pub fn ends_with_abbreviation(s: &str) -> bool {
    TRAILING_ABBREVIATION.is_match(s.trim_end())
}

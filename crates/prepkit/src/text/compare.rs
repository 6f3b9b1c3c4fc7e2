//! Loose string comparisons.

/// Lowercased alphanumeric characters of `s`.
fn alphanumeric_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when `a` and `b` agree after dropping punctuation/whitespace and case.
///
/// `"ACME-Co."` and `"acme co"` are equivalent; two blank strings are not.
pub fn equivalent_alphanumeric(a: &str, b: &str) -> bool {
    let key_a = alphanumeric_key(a);
    !key_a.is_empty() && key_a == alphanumeric_key(b)
}

fn fold(s: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}

/// True when `s` contains any of `needles`. Empty needles never match.
pub fn contains_any_of<S: AsRef<str>>(s: &str, needles: &[S], case_insensitive: bool) -> bool {
    let haystack = fold(s, case_insensitive);
    needles
        .iter()
        .map(|n| fold(n.as_ref(), case_insensitive))
        .any(|n| !n.is_empty() && haystack.contains(&n))
}

/// True when `s` starts with any of `prefixes`. Empty prefixes never match.
pub fn starts_with_any_of<S: AsRef<str>>(s: &str, prefixes: &[S], case_insensitive: bool) -> bool {
    let haystack = fold(s, case_insensitive);
    prefixes
        .iter()
        .map(|p| fold(p.as_ref(), case_insensitive))
        .any(|p| !p.is_empty() && haystack.starts_with(&p))
}

/// True when `s` ends with any of `suffixes`. Empty suffixes never match.
pub fn ends_with_any_of<S: AsRef<str>>(s: &str, suffixes: &[S], case_insensitive: bool) -> bool {
    let haystack = fold(s, case_insensitive);
    suffixes
        .iter()
        .map(|p| fold(p.as_ref(), case_insensitive))
        .any(|p| !p.is_empty() && haystack.ends_with(&p))
}

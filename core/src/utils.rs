//! Naming and cell normalisation helpers
//!
//! Spreadsheet cells are free text typed by curators. These helpers turn them
//! into the identifiers and literal values used in the generated graphs.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern is valid"));

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("static word pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static whitespace pattern is valid"));

/// Cell values that spreadsheet exports use to mean "no value"
const MISSING_MARKERS: &[&str] = &["nan", "na", "<na>", "none"];

/// Lower-case `snake_case` identifier
///
/// Every run of characters outside `[a-z0-9]` (after lower-casing) becomes a
/// single underscore, and leading/trailing underscores are removed.
///
/// ```
/// use rimo_core::utils::slug;
/// assert_eq!(slug("  Number of Users (monthly) "), "number_of_users_monthly");
/// ```
#[must_use]
pub fn slug(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// `UpperCamelCase` identifier
///
/// Splits on runs of non-alphanumeric characters, upper-cases the first
/// character of every part and lower-cases the rest.
///
/// ```
/// use rimo_core::utils::slug_camel;
/// assert_eq!(slug_camel("Number of users"), "NumberOfUsers");
/// assert_eq!(slug_camel("GitHub"), "Github");
/// ```
#[must_use]
pub fn slug_camel(value: &str) -> String {
    NON_ALPHANUMERIC
        .split(value.trim())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Local name for a vocabulary term: trimmed, spaces replaced by underscores
#[must_use]
pub fn local_name(value: &str) -> String {
    value.trim().replace(' ', "_")
}

/// Local name for an indicator in the base ontology
///
/// Like [`local_name`] but slashes are replaced as well, since indicator
/// names such as "Downloads/Month" would otherwise create nested paths.
#[must_use]
pub fn indicator_local_name(value: &str) -> String {
    local_name(value).replace('/', "_")
}

/// Clean a raw cell value
///
/// Returns `None` for empty cells and for the textual missing-value markers
/// (`nan`, `na`, `<na>`, `none`, case-insensitive).
#[must_use]
pub fn clean_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if MISSING_MARKERS.contains(&lowered.as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Collapse newlines and whitespace runs to single spaces
#[must_use]
pub fn normalize_description(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

/// Split a comma separated cell into trimmed, non-empty tokens
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human readable label for a `lowerCamelCase` property name
///
/// ```
/// use rimo_core::utils::humanize_property;
/// assert_eq!(humanize_property("indicatorSet"), "Indicator set");
/// assert_eq!(humanize_property("link"), "Link");
/// ```
#[must_use]
pub fn humanize_property(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.replace('_', " ").chars().enumerate() {
        if idx == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.extend(ch.to_lowercase());
        } else {
            label.push(ch);
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Web Application"), "web_application");
        assert_eq!(slug("__Hits / Month__"), "hits_month");
        assert_eq!(slug("   "), "");
    }

    #[test]
    fn test_slug_camel() {
        assert_eq!(slug_camel("number of citations"), "NumberOfCitations");
        assert_eq!(slug_camel("Google Analytics"), "GoogleAnalytics");
        assert_eq!(slug_camel("h-index / i10"), "HIndexI10");
        assert_eq!(slug_camel(""), "");
    }

    #[test]
    fn test_local_names() {
        assert_eq!(local_name(" Web API "), "Web_API");
        assert_eq!(
            indicator_local_name("Downloads/Month per user"),
            "Downloads_Month_per_user"
        );
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell("  hits "), Some("hits".to_string()));
        assert_eq!(clean_cell(""), None);
        assert_eq!(clean_cell("NaN"), None);
        assert_eq!(clean_cell("<NA>"), None);
        assert_eq!(clean_cell("None"), None);
        assert_eq!(clean_cell("Nan bread"), Some("Nan bread".to_string()));
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(
            normalize_description("Number of\nunique  visitors\r\n per month "),
            "Number of unique visitors per month"
        );
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("Funding Agency, End User,, "),
            vec!["Funding Agency".to_string(), "End User".to_string()]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_humanize_property() {
        assert_eq!(humanize_property("automationTool"), "Automation tool");
        assert_eq!(humanize_property("valueType"), "Value type");
    }

    proptest! {
        #[test]
        fn slug_only_contains_slug_chars(input in ".*") {
            let s = slug(&input);
            prop_assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert!(!s.starts_with('_') && !s.ends_with('_'));
        }

        #[test]
        fn slug_is_idempotent(input in ".*") {
            let once = slug(&input);
            prop_assert_eq!(slug(&once), once.clone());
        }

        #[test]
        fn slug_camel_is_alphanumeric(input in ".*") {
            let s = slug_camel(&input);
            prop_assert!(s.chars().all(char::is_alphanumeric));
        }
    }
}

//! Text formatting for issue labels.

use crate::errors::{ReportError, Result};

/// Strip the issue prefix from a flag name: `hasInputsWithoutLabels`
/// becomes `InputsWithoutLabels`.
pub fn flag_text<'a>(flag_name: &'a str, prefix: &str) -> Result<&'a str> {
    flag_name
        .strip_prefix(prefix)
        .ok_or_else(|| ReportError::MissingPrefix {
            flag: flag_name.to_string(),
            prefix: prefix.to_string(),
        })
}

/// Split camel case at every uppercase letter: `InputsWithoutLabels`
/// yields `["Inputs", "Without", "Labels"]`.
pub fn split_camel_case(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    words.push(current);
    words
}

/// Upper-case the first letter of every alphabetic run and lower-case the
/// rest of it.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for ch in text.chars() {
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_alphabetic();
    }
    out
}

/// Upper-case the first character and lower-case the remainder.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `InputsWithoutLabels` becomes `Inputs Without Labels`.
pub fn issue_type(flag_text: &str) -> String {
    title_case(&split_camel_case(flag_text).join(" "))
}

/// `page_structure` becomes `Page Structure`.
pub fn format_test_name(test_id: &str) -> String {
    test_id
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_text_requires_prefix() {
        assert_eq!(flag_text("hasInputsWithoutLabels", "has").unwrap(), "InputsWithoutLabels");
        let err = flag_text("lacksReducedMotionSupport", "has").unwrap_err();
        assert!(matches!(err, ReportError::MissingPrefix { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_issue_type_splits_camel_case() {
        assert_eq!(issue_type("InputsWithoutLabels"), "Inputs Without Labels");
        assert_eq!(issue_type("ContrastIssues"), "Contrast Issues");
        assert_eq!(issue_type(""), "");
    }

    #[test]
    fn test_acronyms_split_per_letter() {
        assert_eq!(split_camel_case("ARIALabels"), vec!["A", "R", "I", "A", "Labels"]);
    }

    #[test]
    fn test_title_case_restarts_after_non_letters() {
        assert_eq!(title_case("h1 count"), "H1 Count");
        assert_eq!(title_case("color-only links"), "Color-Only Links");
        assert_eq!(title_case("ALL CAPS"), "All Caps");
    }

    #[test]
    fn test_format_test_name() {
        assert_eq!(format_test_name("forms"), "Forms");
        assert_eq!(format_test_name("focus_management"), "Focus Management");
        assert_eq!(format_test_name("HTML_structure"), "Html Structure");
    }
}

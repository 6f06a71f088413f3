//! Normalisation helpers for user-entered names and tag lists.

/// Trim a name and collapse inner whitespace runs into single spaces.
///
/// Returns `None` when nothing but whitespace is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Normalise every entry of a list, dropping blanks and repeated values.
///
/// The first occurrence of each value keeps its position.
pub fn normalize_list(values: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if let Some(normalized) = normalize_name(&value) {
            if !result.contains(&normalized) {
                result.push(normalized);
            }
        }
    }
    result
}

/// Case-insensitive "contains" pattern for `ILIKE`, or `None` for blank input.
///
/// `%`, `_` and `\` in the input match literally; backslash is the default
/// `LIKE` escape character in PostgreSQL.
pub fn contains_pattern(raw: Option<&str>) -> Option<String> {
    let term = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims_and_collapses() {
        assert_eq!(
            normalize_name("  Far   Sistemi \t"),
            Some("Far Sistemi".to_string())
        );
        assert_eq!(normalize_name("Elektrik"), Some("Elektrik".to_string()));
    }

    #[test]
    fn test_normalize_name_blank() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \n\t "), None);
    }

    #[test]
    fn test_normalize_list_drops_blanks_and_duplicates() {
        let values = vec![
            "kapı".to_string(),
            "  ".to_string(),
            " boya ".to_string(),
            "kapı".to_string(),
        ];
        assert_eq!(normalize_list(values), vec!["kapı", "boya"]);
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(Some(" far ")).as_deref(), Some("%far%"));
        assert_eq!(contains_pattern(Some("50%")).as_deref(), Some("%50\\%%"));
        assert_eq!(contains_pattern(Some("a_b")).as_deref(), Some("%a\\_b%"));
        assert_eq!(contains_pattern(Some("c:\\x")).as_deref(), Some("%c:\\\\x%"));
    }

    #[test]
    fn test_contains_pattern_blank() {
        assert_eq!(contains_pattern(None), None);
        assert_eq!(contains_pattern(Some("   ")), None);
    }
}

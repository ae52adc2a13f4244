use std::borrow::Cow;

/// Returns a lowercase representation, reusing the original string if already lowercase.
pub fn lowercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_uppercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_lowercase())
    }
}

/// Trims leading/trailing whitespace without allocating.
pub fn trim(input: &str) -> &str {
    input.trim()
}

/// Trimmed, lowercased form used for exclusion matching.
pub fn normalize_key(input: &str) -> Cow<'_, str> {
    lowercase(trim(input))
}

/// Exact match after trimming and lowercasing `value`; `expected` must already be normalized.
pub fn normalized_eq(value: &str, expected: &str) -> bool {
    normalize_key(value) == expected
}

/// Produces the pandas-style name for the `occurrence`-th repeat of a header (`name.1`, `name.2`, ...).
pub fn disambiguated_header(name: &str, occurrence: usize) -> String {
    if occurrence == 0 {
        name.to_string()
    } else {
        format!("{name}.{occurrence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_borrows_when_unchanged() {
        assert!(matches!(lowercase("already lower"), Cow::Borrowed(_)));
        assert_eq!(lowercase("Rapid Delivery").as_ref(), "rapid delivery");
    }

    #[test]
    fn normalized_eq_ignores_case_and_padding() {
        assert!(normalized_eq("  ABORT\t", "abort"));
        assert!(normalized_eq("Rapid Delivery", "rapid delivery"));
        assert!(!normalized_eq("rapid delivery plus", "rapid delivery"));
        assert!(!normalized_eq("", "abort"));
    }

    #[test]
    fn disambiguated_header_suffixes_repeats() {
        assert_eq!(disambiguated_header("Q1", 0), "Q1");
        assert_eq!(disambiguated_header("Q1", 2), "Q1.2");
    }
}

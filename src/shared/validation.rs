use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slug fields
    /// Must be lowercase alphanumeric segments joined by single hyphens
    /// - Valid: "billing", "getting-started", "faq2"
    /// - Invalid: "-faq", "faq-", "getting--started", "FAQ", "getting_started"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("billing"));
        assert!(SLUG_REGEX.is_match("faq2"));
        assert!(SLUG_REGEX.is_match("getting-started"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
        assert!(SLUG_REGEX.is_match("2024"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-faq")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("faq-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("getting--started")); // double hyphen
        assert!(!SLUG_REGEX.is_match("FAQ")); // uppercase
        assert!(!SLUG_REGEX.is_match("getting_started")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("getting started")); // space
    }
}

//! Whitespace normalization and content fingerprinting shared by every loader.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `text`.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize("a   b\n\tc"), "a b c");
    }

    #[test]
    fn trims_and_handles_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert_eq!(normalize("\r\n  hello world \u{00A0}"), "hello world");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "plain",
            "  leading",
            "trailing\n\n",
            "a\u{2003}\u{2003}b",
            "Page one.\x0cPage two.\r\n\r\nEnd",
            "tabs\t\tand  spaces \u{00A0} mixed",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        // Well-known digest of the empty string.
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        let fp = fingerprint("Paris is the capital of France.");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fingerprint_is_deterministic_and_content_addressed() {
        let a = fingerprint("Paris is the capital of France.");
        assert_eq!(a, fingerprint("Paris is the capital of France."));
        assert_ne!(a, fingerprint("Paris is the capital of France!"));
        assert_ne!(a, fingerprint("paris is the capital of France."));
    }
}

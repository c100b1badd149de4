//! Extraction of secure-password references embedded in string values
//!
//! Assertion fields, connector properties and identity-provider bind
//! templates may carry `${secpass.<name>.plaintext}` placeholders that the
//! gateway expands at runtime. For dependency analysis those placeholders
//! are real edges to `SecurePassword` entities and must be pattern-extracted
//! rather than field-read.

use regex::Regex;
use std::sync::LazyLock;

/// Placeholder pattern for a secure-password reference
pub const SECPASS_REF_PATTERN: &str =
    r"\$\{secpass\.([a-zA-Z_][a-zA-Z0-9_.\-]*)\.plaintext\}";

static SECPASS_REF: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a constant; compilation cannot fail.
    Regex::new(SECPASS_REF_PATTERN).unwrap()
});

/// Extract the secure-password names referenced by a string value
///
/// Names are returned in order of first appearance, deduplicated.
pub fn extract_secure_password_refs(value: &str) -> Vec<String> {
    let mut names = Vec::new();
    for capture in SECPASS_REF.captures_iter(value) {
        let name = capture[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

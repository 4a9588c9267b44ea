// Unique-Identifier Finder
//
// Given an original response and a placeholder-substituted variant, find a
// word that only the original contains. Dynamic parameter values are
// redacted first so that nonces rotating between the two requests do not
// masquerade as a real content difference.
//
// The returned marker, if any, is guaranteed absent from the variant's
// redacted token set and can therefore serve as a positive-match
// fingerprint for a downstream fuzzer (ffuf -mr).

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

lazy_static! {
    static ref WORD_PATTERN: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// Stand-in value written over dynamic parameters before diffing.
pub const REDACTION_TOKEN: &str = "REDACTED";

/// Replace every `name=value` occurrence (value up to `&`) with
/// `name=REDACTED`, for each dynamic parameter name.
pub fn redact_dynamic_params(body: &str, dynamic_params: &BTreeSet<String>) -> String {
    let mut redacted = body.to_string();
    for name in dynamic_params {
        let pattern = Regex::new(&format!(r"{}=([^&]+)", regex::escape(name))).unwrap();
        let replacement = format!("{}={}", name, REDACTION_TOKEN);
        redacted = pattern.replace_all(&redacted, replacement.as_str()).into_owned();
    }
    redacted
}

/// Find a word present in `original` but absent from `variant`, after
/// redacting dynamic parameter values from both.
///
/// Tie-break is deterministic: the redaction token itself is never a
/// candidate, and the lexicographically smallest remaining word wins.
pub fn find_unique_marker(
    original: &str,
    variant: &str,
    dynamic_params: &BTreeSet<String>,
) -> Option<String> {
    let original = redact_dynamic_params(original, dynamic_params);
    let variant = redact_dynamic_params(variant, dynamic_params);

    let original_words: HashSet<&str> =
        WORD_PATTERN.find_iter(&original).map(|m| m.as_str()).collect();
    let variant_words: HashSet<&str> =
        WORD_PATTERN.find_iter(&variant).map(|m| m.as_str()).collect();

    original_words
        .difference(&variant_words)
        .filter(|word| **word != REDACTION_TOKEN)
        .min()
        .map(|word| word.to_string())
}

// Redirect-Substitution Checker
//
// Per URL: extract the redirect_uri target, rebuild the URL with a neutral
// placeholder domain, request the variant with the same batch size, and
// diff the index-aligned response pairs. A difference means the redirect
// target influences page content, which is the open-redirect signal.

use crate::analysis::differ::find_unique_marker;
use crate::models::DifferenceReport;
use crate::requester::Requester;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // http(s) value of redirect_uri, terminated by `&` or end of string
    static ref REDIRECT_URI_PATTERN: Regex =
        Regex::new(r"redirect_uri=(https?://[^&]*)").unwrap();
}

/// Why a substitution check produced no report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// The URL carries no `redirect_uri=http(s)://...` query parameter.
    NoRedirectParam,
    /// The variant request batch failed or came back short.
    VariantRequestFailed,
}

/// Extract the `redirect_uri` target URL from a query string.
pub fn extract_redirect_target(url: &str) -> Option<&str> {
    REDIRECT_URI_PATTERN
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Diff index-aligned original/variant response pairs. The first pair
/// that differs decides the report; later pairs cannot overwrite it.
pub fn diff_batches(
    original: &[String],
    variant: &[String],
    dynamic_params: &BTreeSet<String>,
) -> DifferenceReport {
    for (orig, var) in original.iter().zip(variant.iter()) {
        if orig != var {
            let marker_word = find_unique_marker(orig, var, dynamic_params);
            return DifferenceReport {
                has_diff: true,
                marker_word,
            };
        }
    }
    DifferenceReport::no_difference()
}

/// Run the full substitution check for one URL against its already-fetched
/// original response batch.
pub async fn check_redirect_substitution(
    requester: &Requester,
    url: &str,
    original_responses: &[String],
    dynamic_params: &BTreeSet<String>,
    placeholder: &str,
) -> Result<DifferenceReport, CheckFailure> {
    let redirect_target = match extract_redirect_target(url) {
        Some(target) => target,
        None => {
            println!("Failed to extract target from redirect_uri: {}", url);
            return Err(CheckFailure::NoRedirectParam);
        }
    };

    let variant_url = url.replace(redirect_target, placeholder);
    let variant_responses = requester
        .get_batch(&variant_url)
        .await
        .ok_or(CheckFailure::VariantRequestFailed)?;

    // a short batch is treated as a total failure, never a partial diff
    if variant_responses.len() < original_responses.len() {
        return Err(CheckFailure::VariantRequestFailed);
    }

    Ok(diff_batches(
        original_responses,
        &variant_responses,
        dynamic_params,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(bodies: &[&str]) -> Vec<String> {
        bodies.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn extracts_https_target() {
        let url = "https://idp.example/authorize?client_id=1&redirect_uri=https://app.example/cb&state=x";
        assert_eq!(
            extract_redirect_target(url),
            Some("https://app.example/cb")
        );
    }

    #[test]
    fn extracts_http_target_up_to_ampersand() {
        let url = "https://idp.example/a?redirect_uri=http://app.example/cb&x=1";
        assert_eq!(extract_redirect_target(url), Some("http://app.example/cb"));
    }

    #[test]
    fn rejects_non_http_target() {
        // javascript: and relative values are not extraction candidates
        assert_eq!(
            extract_redirect_target("https://idp.example/a?redirect_uri=/local/path"),
            None
        );
        assert_eq!(
            extract_redirect_target("https://idp.example/a?foo=1&bar=2"),
            None
        );
    }

    #[test]
    fn identical_batches_report_no_difference() {
        let original = batch(&["same body", "same body"]);
        let variant = batch(&["same body", "same body"]);
        let report = diff_batches(&original, &variant, &BTreeSet::new());
        assert!(!report.has_diff);
        assert_eq!(report.marker_word, None);
    }

    #[test]
    fn first_differing_pair_wins() {
        let original = batch(&["common", "common FIRST", "common SECOND"]);
        let variant = batch(&["common", "common", "common"]);
        let report = diff_batches(&original, &variant, &BTreeSet::new());
        assert!(report.has_diff);
        assert_eq!(report.marker_word, Some("FIRST".to_string()));
    }

    #[test]
    fn difference_without_marker_still_reported() {
        // variant has extra words but the original has none of its own
        let original = batch(&["common"]);
        let variant = batch(&["common plus extra"]);
        let report = diff_batches(&original, &variant, &BTreeSet::new());
        assert!(report.has_diff);
        assert_eq!(report.marker_word, None);
    }

    #[tokio::test]
    async fn missing_redirect_uri_is_terminal_without_requests() {
        let requester = Requester::new(2);
        let result = check_redirect_substitution(
            &requester,
            "https://idp.example/a?foo=1",
            &batch(&["body", "body"]),
            &BTreeSet::new(),
            "https://example.com",
        )
        .await;
        assert_eq!(result, Err(CheckFailure::NoRedirectParam));
    }
}

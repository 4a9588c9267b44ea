// Dynamic-Parameter Inference
//
// Repeated requests to the same endpoint surface anti-CSRF tokens and
// nonces: parameters whose value is fresh on every response. Those values
// are pure noise for response diffing, so they get identified here and
// redacted before any comparison (see differ.rs).
//
// A parameter is dynamic iff it appears in every response of the batch and
// no two responses share a value for it. Parameters that only show up in
// some responses cannot be classified and are excluded.
//
// Example:
//   Input:  ["...csrf=a1&page=1...", "...csrf=b2&page=1...", "...csrf=c3&page=1..."]
//   Output: {"csrf"}

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

lazy_static! {
    // key=value pair, value terminated by `&` or end of input
    static ref PAIR_PATTERN: Regex = Regex::new(r"(\w+)=([^&]+)").unwrap();
}

/// Infer which query parameters take a fresh value on every response in
/// the batch. Returns an ordered set so downstream redaction and test
/// output are deterministic.
pub fn identify_dynamic_parameters(responses: &[String]) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    let joined = responses.join("&");
    for cap in PAIR_PATTERN.captures_iter(&joined) {
        candidates.insert(cap[1].to_string());
    }

    let mut dynamic = BTreeSet::new();
    for name in candidates {
        let values = first_occurrences(&name, responses);

        // a key absent from any response cannot be classified
        if values.len() != responses.len() {
            continue;
        }

        let distinct: HashSet<&str> = values.iter().map(|v| v.as_str()).collect();
        if distinct.len() == values.len() {
            dynamic.insert(name);
        }
    }
    dynamic
}

/// First `name=value` occurrence per response body, in batch order.
/// Responses lacking the key contribute nothing.
fn first_occurrences(name: &str, responses: &[String]) -> Vec<String> {
    let pattern = Regex::new(&format!(r"{}=([^&]+)", regex::escape(name))).unwrap();
    responses
        .iter()
        .filter_map(|body| pattern.captures(body).map(|cap| cap[1].to_string()))
        .collect()
}

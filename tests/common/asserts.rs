use super::headers::{has_header, header_value, vary_values};
use cors_policy_rs::constants::header;
use cors_policy_rs::{CorsDecision, Headers};
use std::collections::HashSet;

pub fn assert_actual(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Actual(result) => result.headers,
        other => panic!("expected actual decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (Headers, u16) {
    match decision {
        CorsDecision::Preflight(result) => (result.headers, result.status),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_header_absent(headers: &Headers, name: &str) {
    assert!(
        !has_header(headers, name),
        "{name} should be absent, got {:?}",
        header_value(headers, name)
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: HashSet<String> = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
}

pub fn assert_vary_is_empty(headers: &Headers) {
    assert_header_absent(headers, header::VARY);
}

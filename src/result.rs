use crate::headers::Headers;

/// A preflight answered by the policy itself; the resource action must not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: Headers,
    pub status: u16,
}

/// Headers to add to the response produced by the resource action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualResult {
    pub headers: Headers,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    Preflight(PreflightResult),
    Actual(ActualResult),
}

impl CorsDecision {
    pub fn headers(&self) -> &Headers {
        match self {
            CorsDecision::Preflight(result) => &result.headers,
            CorsDecision::Actual(result) => &result.headers,
        }
    }

    pub fn is_preflight(&self) -> bool {
        matches!(self, CorsDecision::Preflight(_))
    }
}

//! Hooks that plug a [`CorsPolicy`] into a host framework's dispatch cycle.
//!
//! The host calls [`DispatchHooks::before_dispatch`] ahead of the resource
//! action; a returned response means the request was a preflight and the action
//! must be skipped. Otherwise the action runs and its response goes through
//! [`DispatchHooks::after_dispatch`], which only touches headers.

use crate::config::CorsConfig;
use crate::constants::header;
use crate::context::RequestContext;
use crate::error::ValidationError;
use crate::headers::{Headers, merge_vary};
use crate::policy::CorsPolicy;
use crate::result::CorsDecision;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use tracing::warn;

/// Owned copy of the request fields the policy reads, so it outlives the
/// request once the request has been handed to the resource action.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl RequestSnapshot {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_parts(request.method(), request.headers())
    }

    pub fn from_parts(method: &Method, headers: &HeaderMap) -> Self {
        Self {
            method: method.as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    pub fn as_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

/// Contract between a middleware and the host's dispatch loop.
pub trait DispatchHooks {
    /// Returns a response to send instead of running the resource action.
    fn before_dispatch<R: Default>(&self, request: &RequestSnapshot) -> Option<Response<R>>;

    /// Adjusts the response produced by the resource action.
    fn after_dispatch<R>(&self, request: &RequestSnapshot, response: Response<R>) -> Response<R>;

    fn dispatch<B, R, F>(&self, request: Request<B>, action: F) -> Response<R>
    where
        R: Default,
        F: FnOnce(Request<B>) -> Response<R>,
    {
        let snapshot = RequestSnapshot::from_request(&request);
        if let Some(response) = self.before_dispatch(&snapshot) {
            return response;
        }
        let response = action(request);
        self.after_dispatch(&snapshot, response)
    }
}

#[derive(Debug, Clone)]
pub struct CorsMiddleware {
    policy: CorsPolicy,
}

impl CorsMiddleware {
    pub fn new(policy: CorsPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: CorsConfig) -> Result<Self, ValidationError> {
        CorsPolicy::new(config).map(Self::new)
    }

    pub fn policy(&self) -> &CorsPolicy {
        &self.policy
    }
}

impl From<CorsPolicy> for CorsMiddleware {
    fn from(policy: CorsPolicy) -> Self {
        Self::new(policy)
    }
}

impl DispatchHooks for CorsMiddleware {
    fn before_dispatch<R: Default>(&self, request: &RequestSnapshot) -> Option<Response<R>> {
        match self.policy.evaluate(&request.as_context()) {
            CorsDecision::Preflight(result) => {
                let mut response = Response::new(R::default());
                *response.status_mut() =
                    StatusCode::from_u16(result.status).unwrap_or(StatusCode::OK);
                apply_headers(response.headers_mut(), &result.headers);
                Some(response)
            }
            CorsDecision::Actual(_) => None,
        }
    }

    fn after_dispatch<R>(
        &self,
        request: &RequestSnapshot,
        mut response: Response<R>,
    ) -> Response<R> {
        let decision = self.policy.evaluate(&request.as_context());
        apply_headers(response.headers_mut(), decision.headers());
        response
    }
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        if name.eq_ignore_ascii_case(header::VARY) {
            apply_vary(map, value);
            continue;
        }

        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                map.insert(header_name, header_value);
            }
            _ => warn!(header = %name, value = %value, "skipping CORS header with invalid value"),
        }
    }
}

fn apply_vary(map: &mut HeaderMap, value: &str) {
    let existing = map
        .get_all(http::header::VARY)
        .iter()
        .filter_map(|entry| entry.to_str().ok())
        .collect::<Vec<_>>()
        .join(",");
    let existing = (!existing.is_empty()).then_some(existing);

    let Some(merged) = merge_vary(existing.as_deref(), value) else {
        return;
    };
    match HeaderValue::from_str(&merged) {
        Ok(header_value) => {
            map.insert(http::header::VARY, header_value);
        }
        Err(_) => warn!(value = %merged, "skipping invalid Vary header"),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;

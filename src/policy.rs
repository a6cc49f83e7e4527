use crate::config::CorsConfig;
use crate::constants::{defaults, header, method};
use crate::context::RequestContext;
use crate::error::ValidationError;
use crate::headers::HeaderCollection;
use crate::origin::{AllowOrigin, OriginDecision};
use crate::result::{ActualResult, CorsDecision, PreflightResult};
use crate::util::present;
use tracing::{debug, trace};

/// Core CORS policy engine that evaluates requests using [`CorsConfig`].
///
/// The configuration is fixed once the policy is built, so a single policy
/// can be shared by every request of a resource.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    config: CorsConfig,
}

impl CorsPolicy {
    pub fn new(mut config: CorsConfig) -> Result<Self, ValidationError> {
        // A literal "*" set directly on the enum must still honour credentials.
        if let AllowOrigin::Exact(value) = &config.allow_origin
            && value.trim() == defaults::ALLOW_ORIGIN
        {
            config.allow_origin = AllowOrigin::Any;
        }
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CorsConfig {
        &self.config
    }

    /// An `OPTIONS` request carrying `Access-Control-Request-Method` is a preflight;
    /// everything else is an actual request.
    pub fn is_preflight(request: &RequestContext<'_>) -> bool {
        request.method.eq_ignore_ascii_case(method::OPTIONS)
            && present(request.access_control_request_method).is_some()
    }

    pub fn evaluate(&self, request: &RequestContext<'_>) -> CorsDecision {
        if Self::is_preflight(request) {
            let result = self.evaluate_preflight(request);
            debug!(
                origin = request.origin.unwrap_or_default(),
                requested_method = request.access_control_request_method.unwrap_or_default(),
                "answering CORS preflight"
            );
            CorsDecision::Preflight(result)
        } else {
            trace!(
                method = request.method,
                origin = request.origin.unwrap_or_default(),
                "decorating actual CORS request"
            );
            CorsDecision::Actual(self.evaluate_actual(request))
        }
    }

    fn evaluate_preflight(&self, request: &RequestContext<'_>) -> PreflightResult {
        let mut headers = HeaderCollection::new();
        self.build_origin_header(request, &mut headers);
        headers.push_opt(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.config.allow_methods.header_value(),
        );
        headers.push(
            header::ACCESS_CONTROL_MAX_AGE,
            self.config.max_age.to_string(),
        );
        headers.push_opt(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.config
                .allow_headers
                .header_value(present(request.access_control_request_headers)),
        );
        self.build_credentials_headers(&mut headers);

        PreflightResult {
            headers: headers.into_headers(),
            status: defaults::PREFLIGHT_STATUS,
        }
    }

    fn evaluate_actual(&self, request: &RequestContext<'_>) -> ActualResult {
        let mut headers = HeaderCollection::new();
        self.build_origin_header(request, &mut headers);
        self.build_credentials_headers(&mut headers);
        headers.push_opt(
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            self.config.expose_headers.header_value(),
        );

        ActualResult {
            headers: headers.into_headers(),
        }
    }

    fn build_origin_header(&self, request: &RequestContext<'_>, headers: &mut HeaderCollection) {
        let credentials = self.config.allow_credentials;
        match self
            .config
            .allow_origin
            .resolve(present(request.origin), credentials)
        {
            OriginDecision::Wildcard => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, defaults::ALLOW_ORIGIN);
            }
            OriginDecision::Fixed(value) | OriginDecision::Mirror(value) => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
            OriginDecision::Disallow => {
                debug!(
                    origin = request.origin.unwrap_or_default(),
                    "origin not allowed, omitting Access-Control-Allow-Origin"
                );
            }
        }

        if self.config.allow_origin.varies_by_origin(credentials) {
            headers.add_vary(header::ORIGIN);
        }
    }

    fn build_credentials_headers(&self, headers: &mut HeaderCollection) {
        if self.config.allow_credentials {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use cors_policy_rs::constants::method;
use cors_policy_rs::{
    AllowOrigin, AllowedHeaders, CorsConfig, CorsDecision, CorsPolicy, RequestContext,
};

#[derive(Default)]
pub struct PolicyBuilder {
    origin: Option<AllowOrigin>,
    methods: Option<Vec<String>>,
    allowed_headers: Option<AllowedHeaders>,
    exposed_headers: Option<Vec<String>>,
    credentials: Option<bool>,
    max_age: Option<u64>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: AllowOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.allowed_headers = Some(headers);
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = Some(enabled);
        self
    }

    pub fn max_age(mut self, value: u64) -> Self {
        self.max_age = Some(value);
        self
    }

    pub fn build(self) -> CorsPolicy {
        let mut builder = CorsConfig::builder();
        if let Some(origin) = self.origin {
            builder = builder.allow_origin(origin);
        }
        if let Some(methods) = self.methods {
            builder = builder.allow_methods(methods);
        }
        if let Some(headers) = self.allowed_headers {
            builder = builder.allow_headers(headers);
        }
        if let Some(headers) = self.exposed_headers {
            builder = builder.expose_headers(headers);
        }
        if let Some(credentials) = self.credentials {
            builder = builder.allow_credentials(credentials);
        }
        if let Some(max_age) = self.max_age {
            builder = builder.max_age(max_age);
        }

        let config = builder.build().expect("valid CORS configuration");
        CorsPolicy::new(config).expect("valid CORS configuration")
    }
}

pub struct ActualRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl ActualRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn evaluate(self, policy: &CorsPolicy) -> CorsDecision {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        policy.evaluate(&ctx)
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self {
            request_method: Some(method::GET.into()),
            ..Self::default()
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn without_request_method(mut self) -> Self {
        self.request_method = None;
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn evaluate(self, policy: &CorsPolicy) -> CorsDecision {
        let ctx = RequestContext {
            method: method::OPTIONS,
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
        };
        policy.evaluate(&ctx)
    }
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn actual_request() -> ActualRequestBuilder {
    ActualRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}

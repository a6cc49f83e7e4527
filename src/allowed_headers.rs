use crate::constants::defaults;
use crate::error::ValidationError;
use crate::util::{collect_header_names, is_http_token};

/// How `Access-Control-Allow-Headers` is answered on preflight.
///
/// Either way the header is only emitted when the preflight carried
/// `Access-Control-Request-Headers`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AllowedHeaders {
    /// Echo the request's `Access-Control-Request-Headers` verbatim.
    #[default]
    MirrorRequest,
    /// Answer with a fixed list.
    List(Vec<String>),
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(collect_header_names(values))
    }

    pub fn mirror_request() -> Self {
        Self::MirrorRequest
    }

    pub(crate) fn header_value(&self, request_headers: Option<&str>) -> Option<String> {
        let request_headers = request_headers?;
        match self {
            AllowedHeaders::MirrorRequest => Some(request_headers.to_string()),
            AllowedHeaders::List(values) if values.is_empty() => None,
            AllowedHeaders::List(values) => Some(values.join(defaults::LIST_SEPARATOR)),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AllowedHeaders::MirrorRequest => Ok(()),
            AllowedHeaders::List(values) => match values.iter().find(|v| !is_http_token(v)) {
                Some(invalid) => Err(ValidationError::InvalidHeaderName(invalid.clone())),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;

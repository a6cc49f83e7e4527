use crate::constants::defaults;
use crate::error::ValidationError;
use crate::util::{collect_header_names, is_http_token};

/// Response headers made readable to scripts on actual requests.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ExposedHeaders(Vec<String>);

impl ExposedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(collect_header_names(values))
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(defaults::LIST_SEPARATOR))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self.0.iter().find(|value| !is_http_token(value)) {
            Some(invalid) => Err(ValidationError::InvalidHeaderName(invalid.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;

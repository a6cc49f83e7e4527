use crate::constants::{defaults, method};
use crate::error::ValidationError;
use crate::util::is_http_token;
use indexmap::IndexSet;

/// Ordered set of methods advertised in `Access-Control-Allow-Methods`.
///
/// Method names are case-sensitive and keep the order they were added in.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AllowedMethods(IndexSet<String>);

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .map(|value| value.into().trim().to_string())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, method: &str) -> bool {
        self.0.contains(method)
    }

    /// Comma-space joined methods, or `None` when nothing is allowed.
    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.iter().collect::<Vec<_>>().join(defaults::LIST_SEPARATOR))
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self.iter().find(|value| !is_http_token(value)) {
            Some(invalid) => Err(ValidationError::InvalidMethod(invalid.to_string())),
            None => Ok(()),
        }
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::list([
            method::GET,
            method::POST,
            method::PUT,
            method::PATCH,
            method::DELETE,
        ])
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;

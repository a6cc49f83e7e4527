use regex_automata::meta::BuildError;
use thiserror::Error;

/// Errors raised while compiling an origin pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

/// Configuration problems detected when building a [`CorsPolicy`](crate::CorsPolicy).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("allowed method `{0}` is not a valid HTTP token")]
    InvalidMethod(String),
    #[error("header name `{0}` is not a valid HTTP token")]
    InvalidHeaderName(String),
    #[error("allowed origin `{0}` must be a non-blank value without whitespace")]
    InvalidOrigin(String),
    #[error("origin list must contain at least one matcher")]
    EmptyOriginList,
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

use crate::constants::defaults;
use crate::error::{PatternError, ValidationError};
use crate::util::equals_ignore_case;
use regex_automata::meta::Regex;

const MAX_PATTERN_LENGTH: usize = 50_000;
const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Which origins the policy answers for.
#[derive(Debug, Clone, Default)]
pub enum AllowOrigin {
    /// Emit `*`, or echo the request origin once credentials are allowed.
    #[default]
    Any,
    /// Emit the configured origin verbatim on every response.
    Exact(String),
    /// Echo the request origin when one of the matchers accepts it.
    List(Vec<OriginMatcher>),
}

#[derive(Debug, Clone)]
pub enum OriginMatcher {
    Exact(String),
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Compiles `pattern` as a case-insensitive regular expression.
    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let regex = Regex::new(&format!("(?i:{pattern})"))
            .map_err(|err| PatternError::Build(Box::new(err)))?;
        Ok(Self::Pattern(regex))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => equals_ignore_case(value, candidate),
            OriginMatcher::Pattern(regex) => regex.is_match(candidate.as_bytes()),
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

/// Outcome of matching a request origin against [`AllowOrigin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OriginDecision<'a> {
    Wildcard,
    Fixed(&'a str),
    Mirror(&'a str),
    Disallow,
}

impl AllowOrigin {
    pub fn any() -> Self {
        Self::Any
    }

    /// A single origin. `"*"` is the wildcard and yields [`AllowOrigin::Any`].
    pub fn exact<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value.trim() == defaults::ALLOW_ORIGIN {
            Self::Any
        } else {
            Self::Exact(value)
        }
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AllowOrigin::Any => Ok(()),
            AllowOrigin::Exact(value) => validate_origin(value),
            AllowOrigin::List(matchers) if matchers.is_empty() => {
                Err(ValidationError::EmptyOriginList)
            }
            AllowOrigin::List(matchers) => matchers.iter().try_for_each(|matcher| match matcher {
                OriginMatcher::Exact(value) => validate_origin(value),
                OriginMatcher::Pattern(_) => Ok(()),
            }),
        }
    }

    /// Whether the emitted origin depends on the request's `Origin` header.
    pub(crate) fn varies_by_origin(&self, credentials: bool) -> bool {
        match self {
            AllowOrigin::Any | AllowOrigin::Exact(_) => credentials,
            AllowOrigin::List(_) => true,
        }
    }

    pub(crate) fn resolve<'a>(
        &'a self,
        request_origin: Option<&'a str>,
        credentials: bool,
    ) -> OriginDecision<'a> {
        let request_origin = request_origin.filter(|origin| origin.len() <= MAX_ORIGIN_LENGTH);

        match self {
            AllowOrigin::Any if !credentials => OriginDecision::Wildcard,
            AllowOrigin::Any => match request_origin {
                Some(origin) => OriginDecision::Mirror(origin),
                None => OriginDecision::Disallow,
            },
            AllowOrigin::Exact(value) => OriginDecision::Fixed(value.as_str()),
            AllowOrigin::List(matchers) => match request_origin {
                Some(origin) if matchers.iter().any(|matcher| matcher.matches(origin)) => {
                    OriginDecision::Mirror(origin)
                }
                _ => OriginDecision::Disallow,
            },
        }
    }
}

fn validate_origin(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty()
        || value
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return Err(ValidationError::InvalidOrigin(value.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::defaults;
use crate::error::ValidationError;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::{AllowOrigin, OriginMatcher};
use serde::Deserialize;

/// Static CORS configuration of a resource.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origin: AllowOrigin,
    pub allow_credentials: bool,
    pub allow_methods: AllowedMethods,
    pub allow_headers: AllowedHeaders,
    pub expose_headers: ExposedHeaders,
    /// Seconds a browser may cache the preflight answer.
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: AllowOrigin::Any,
            allow_credentials: false,
            allow_methods: AllowedMethods::default(),
            allow_headers: AllowedHeaders::default(),
            expose_headers: ExposedHeaders::default(),
            max_age: defaults::MAX_AGE,
        }
    }
}

impl CorsConfig {
    pub fn builder() -> CorsConfigBuilder {
        CorsConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.allow_origin.validate()?;
        self.allow_methods.validate()?;
        self.allow_headers.validate()?;
        self.expose_headers.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfigBuilder {
    config: CorsConfig,
}

impl CorsConfigBuilder {
    pub fn allow_origin(mut self, origin: AllowOrigin) -> Self {
        self.config.allow_origin = origin;
        self
    }

    pub fn allow_credentials(mut self, enabled: bool) -> Self {
        self.config.allow_credentials = enabled;
        self
    }

    pub fn allow_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.allow_methods = AllowedMethods::list(methods);
        self
    }

    pub fn allow_headers(mut self, headers: AllowedHeaders) -> Self {
        self.config.allow_headers = headers;
        self
    }

    pub fn expose_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.expose_headers = ExposedHeaders::list(headers);
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.config.max_age = seconds;
        self
    }

    pub fn build(self) -> Result<CorsConfig, ValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// One origin or several, as written in a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OriginSetting {
    One(String),
    Many(Vec<String>),
}

impl Default for OriginSetting {
    fn default() -> Self {
        OriginSetting::One(defaults::ALLOW_ORIGIN.to_string())
    }
}

/// Deserializable form of [`CorsConfig`], e.g. a `[cors]` table in a TOML file.
///
/// `allow_headers` left unset mirrors the preflight's requested headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsSettings {
    pub allow_origin: OriginSetting,
    pub allow_origin_patterns: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Option<Vec<String>>,
    pub expose_headers: Vec<String>,
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allow_origin: OriginSetting::default(),
            allow_origin_patterns: Vec::new(),
            allow_credentials: false,
            allow_methods: AllowedMethods::default().iter().map(str::to_string).collect(),
            allow_headers: None,
            expose_headers: Vec::new(),
            max_age: defaults::MAX_AGE,
        }
    }
}

impl TryFrom<CorsSettings> for CorsConfig {
    type Error = ValidationError;

    fn try_from(settings: CorsSettings) -> Result<Self, Self::Error> {
        let CorsSettings {
            allow_origin,
            allow_origin_patterns,
            allow_credentials,
            allow_methods,
            allow_headers,
            expose_headers,
            max_age,
        } = settings;

        let is_wildcard = |value: &String| value.trim() == defaults::ALLOW_ORIGIN;
        let mut origins = match allow_origin {
            OriginSetting::One(value) => vec![value],
            OriginSetting::Many(values) => values,
        };

        // Patterns narrow the policy, so a leftover "*" no longer means any origin.
        let allow_origin = if allow_origin_patterns.is_empty() {
            if origins.iter().any(is_wildcard) {
                AllowOrigin::Any
            } else if origins.len() == 1 {
                AllowOrigin::exact(origins.remove(0))
            } else {
                AllowOrigin::list(origins)
            }
        } else {
            origins.retain(|value| !is_wildcard(value));
            let mut matchers: Vec<OriginMatcher> =
                origins.into_iter().map(OriginMatcher::exact).collect();
            for pattern in &allow_origin_patterns {
                matchers.push(OriginMatcher::pattern_str(pattern)?);
            }
            AllowOrigin::List(matchers)
        };

        let config = CorsConfig {
            allow_origin,
            allow_credentials,
            allow_methods: AllowedMethods::list(allow_methods),
            allow_headers: allow_headers
                .map(AllowedHeaders::list)
                .unwrap_or_default(),
            expose_headers: ExposedHeaders::list(expose_headers),
            max_age,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

mod allowed_headers;
mod allowed_methods;
mod config;
pub mod constants;
mod context;
mod error;
mod exposed_headers;
mod headers;
pub mod middleware;
mod origin;
mod policy;
mod result;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use config::{CorsConfig, CorsConfigBuilder, CorsSettings, OriginSetting};
pub use context::RequestContext;
pub use error::{PatternError, ValidationError};
pub use exposed_headers::ExposedHeaders;
pub use headers::Headers;
pub use middleware::{CorsMiddleware, DispatchHooks, RequestSnapshot};
pub use origin::{AllowOrigin, OriginMatcher};
pub use policy::CorsPolicy;
pub use result::{ActualResult, CorsDecision, PreflightResult};

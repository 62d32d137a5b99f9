use http::header::{InvalidHeaderName, InvalidHeaderValue};
use http::method::InvalidMethod;
use http::status::InvalidStatusCode;
use http::uri::InvalidUri;
use thiserror::Error;

/// Errors raised while turning configuration into runtime types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid HTTP method '{0}': {1}")]
    InvalidMethod(String, #[source] InvalidMethod),

    #[error("Invalid request URI '{0}': {1}")]
    InvalidUri(String, #[source] InvalidUri),

    #[error("Invalid status code {0}: {1}")]
    InvalidStatusCode(u16, #[source] InvalidStatusCode),

    #[error("Invalid header name '{0}': {1}")]
    InvalidHeaderName(String, #[source] InvalidHeaderName),

    #[error("Invalid value for header '{name}': {error}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        error: InvalidHeaderValue,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

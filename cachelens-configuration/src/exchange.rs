//! Declarative exchange descriptions.

use cachelens_http::Exchange;
use http::{Method, StatusCode, Uri};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::headers::{HeaderConfig, to_header_map};

/// A captured exchange, as written in a fixture file.
///
/// Every field is optional; the defaults describe `GET /` answered with
/// `200 OK` and no headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub method: String,
    pub path: String,
    /// Query string, with or without the leading `?`.
    pub query: Option<String>,
    pub status: u16,
    pub request_headers: HeaderConfig,
    pub response_headers: HeaderConfig,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            method: Method::GET.to_string(),
            path: "/".to_string(),
            query: None,
            status: StatusCode::OK.as_u16(),
            request_headers: HeaderConfig::new(),
            response_headers: HeaderConfig::new(),
        }
    }
}

impl ExchangeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Request target: path followed by the query, if any.
    pub fn target(&self) -> String {
        match self.query.as_deref().map(|query| query.trim_start_matches('?')) {
            Some(query) if !query.is_empty() => format!("{}?{}", self.path, query),
            _ => self.path.clone(),
        }
    }

    /// Validates the description and builds an [`Exchange`].
    pub fn into_exchange(self) -> Result<Exchange, ConfigError> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|e| ConfigError::InvalidMethod(self.method.clone(), e))?;
        let target = self.target();
        let uri = target
            .parse::<Uri>()
            .map_err(|e| ConfigError::InvalidUri(target.clone(), e))?;
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| ConfigError::InvalidStatusCode(self.status, e))?;

        Ok(Exchange::new(method, uri, status)
            .with_request_headers(to_header_map(&self.request_headers)?)
            .with_response_headers(to_header_map(&self.response_headers)?))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_target() {
        let mut config = ExchangeConfig {
            path: "/abc".to_string(),
            query: Some("?a=b".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target(), "/abc?a=b");

        config.query = Some("a=b".to_string());
        assert_eq!(config.target(), "/abc?a=b");

        config.query = Some(String::new());
        assert_eq!(config.target(), "/abc");
    }

    #[test]
    fn test_defaults() {
        let exchange = ExchangeConfig::default().into_exchange().unwrap();
        assert_eq!(exchange.method(), Method::GET);
        assert_eq!(exchange.status(), StatusCode::OK);
        assert_eq!(exchange.path_and_query(), "/");
        assert!(exchange.response_headers().is_empty());
    }

    #[test]
    fn test_invalid_fields() {
        let config = ExchangeConfig {
            method: "GE T".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.into_exchange(), Err(ConfigError::InvalidMethod(..))));

        let config = ExchangeConfig {
            status: 42,
            ..Default::default()
        };
        assert!(matches!(
            config.into_exchange(),
            Err(ConfigError::InvalidStatusCode(42, _))
        ));

        let config = ExchangeConfig {
            path: "not a path".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.into_exchange(), Err(ConfigError::InvalidUri(..))));
    }
}

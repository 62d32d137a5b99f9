//! Header configuration types.
//!
//! Headers are described by name with a scalar value, a list of values, or
//! `~` for a header that is known but absent:
//!
//! ```yaml
//! Cache-Control: "public, max-age=60"
//! Vary: ["Accept", "Accept-Encoding"]   # one header line per value
//! ETag: ~                               # absent
//! ```

use http::header::{HeaderMap, HeaderName, HeaderValue as HttpHeaderValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Header value configuration: one value or several.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(untagged)]
pub enum HeaderValue {
    /// `Header: "value"`
    Single(String),
    /// `Header: ["value1", "value2"]`
    Multiple(Vec<String>),
}

impl HeaderValue {
    pub fn values(&self) -> &[String] {
        match self {
            HeaderValue::Single(value) => std::slice::from_ref(value),
            HeaderValue::Multiple(values) => values,
        }
    }
}

/// Ordered map of header names to optional values.
pub type HeaderConfig = IndexMap<String, Option<HeaderValue>>;

/// Parse a header name string into `HeaderName`.
pub fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse()
        .map_err(|e| ConfigError::InvalidHeaderName(name.to_string(), e))
}

/// Parse a header value string into an HTTP `HeaderValue`.
pub fn parse_header_value(name: &str, value: &str) -> Result<HttpHeaderValue, ConfigError> {
    value
        .parse()
        .map_err(|error| ConfigError::InvalidHeaderValue {
            name: name.to_string(),
            error,
        })
}

/// Converts a header configuration into a `HeaderMap`. Absent headers are
/// skipped; list values become repeated header lines.
pub fn to_header_map(config: &HeaderConfig) -> Result<HeaderMap, ConfigError> {
    HeaderList::from_config(config).to_header_map()
}

/// Ordered list of `(name, value)` pairs, the model behind a header editor.
///
/// Unlike a `HeaderMap`, a list keeps entries exactly as typed, including
/// incomplete ones, so it can be edited one field at a time and validated
/// only when converted.
#[derive(Serialize, Deserialize, Debug, Default, Eq, PartialEq, Clone)]
#[serde(transparent)]
pub struct HeaderList(Vec<(String, String)>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// One pair per header value. Bytes that are not UTF-8 are replaced.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        Self(
            headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        )
    }

    /// One pair per configured value. Absent values become empty strings.
    pub fn from_config(config: &HeaderConfig) -> Self {
        let mut list = Self::new();
        for (name, value) in config {
            match value {
                Some(value) => {
                    for value in value.values() {
                        list.push(name.clone(), value.clone());
                    }
                }
                None => list.push(name.clone(), String::new()),
            }
        }
        list
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Mutable access to the pair at `index`, for in-place edits.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (String, String)> {
        self.0.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<(String, String)> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validates every pair and builds a `HeaderMap`.
    ///
    /// Pairs with an empty value are treated as absent headers and skipped.
    pub fn to_header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            let header_name = parse_header_name(name)?;
            if value.is_empty() {
                continue;
            }
            headers.append(header_name, parse_header_value(name, value)?);
        }
        Ok(headers)
    }
}

impl FromIterator<(String, String)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use http::header::{CACHE_CONTROL, VARY};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_config_flattens_lists() {
        let mut config = HeaderConfig::new();
        config.insert(
            "Vary".to_string(),
            Some(HeaderValue::Multiple(vec!["Accept".into(), "Origin".into()])),
        );
        config.insert("ETag".to_string(), None);

        let list = HeaderList::from_config(&config);
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![("Vary", "Accept"), ("Vary", "Origin"), ("ETag", "")]
        );
    }

    #[test]
    fn test_edits() {
        let mut list = HeaderList::new();
        list.push("cache-control", "");
        list.push("x-trace", "1");
        if let Some(entry) = list.get_mut(0) {
            entry.1 = "no-store".to_string();
        }
        assert_eq!(list.remove(1), Some(("x-trace".to_string(), "1".to_string())));
        assert_eq!(list.remove(5), None);

        let headers = list.to_header_map().unwrap();
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_header_map_round_trip() {
        let mut headers = HeaderMap::new();
        headers.append(VARY, HttpHeaderValue::from_static("accept"));
        headers.append(VARY, HttpHeaderValue::from_static("origin"));

        let list = HeaderList::from_header_map(&headers);
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_header_map().unwrap(), headers);
    }

    #[test]
    fn test_invalid_name() {
        let list: HeaderList = [("bad name".to_string(), "x".to_string())].into_iter().collect();
        assert!(matches!(
            list.to_header_map(),
            Err(ConfigError::InvalidHeaderName(name, _)) if name == "bad name"
        ));
    }

    #[test]
    fn test_invalid_value() {
        let list: HeaderList = [("x-bad".to_string(), "line\nbreak".to_string())]
            .into_iter()
            .collect();
        assert!(matches!(
            list.to_header_map(),
            Err(ConfigError::InvalidHeaderValue { name, .. }) if name == "x-bad"
        ));
    }
}

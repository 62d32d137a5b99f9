use http::HeaderMap;
use http::header::ACCESS_CONTROL_MAX_AGE;

/// The response `Access-Control-Max-Age` header.
///
/// The preflight rule keys on the header being provided, so a malformed
/// value is kept as [`CorsMaxAge::Invalid`] rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsMaxAge {
    Seconds(u64),
    Invalid,
}

impl CorsMaxAge {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()) {
            CorsMaxAge::Seconds(value.parse().unwrap_or(u64::MAX))
        } else {
            CorsMaxAge::Invalid
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(ACCESS_CONTROL_MAX_AGE)
            .map(|value| value.to_str().map_or(CorsMaxAge::Invalid, CorsMaxAge::parse))
    }

    pub fn seconds(self) -> Option<u64> {
        match self {
            CorsMaxAge::Seconds(seconds) => Some(seconds),
            CorsMaxAge::Invalid => None,
        }
    }
}

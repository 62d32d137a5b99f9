//! Header interpretation.
//!
//! Turns the raw headers of an [`Exchange`] into the structured facts the
//! rule tables match on. Interpretation never fails: unknown tokens are
//! ignored, and malformed values degrade to "absent".
//!
//! | Header | Type |
//! |--------|------|
//! | `Cache-Control` | [`CacheDirectives`] |
//! | `Pragma` | [`Pragma`] |
//! | `Date`, `Expires`, `Last-Modified` | [`Timestamps`] |
//! | `ETag`, `Last-Modified` | [`Validators`] |
//! | `Vary` | [`Vary`] |
//! | `Access-Control-Max-Age` | [`CorsMaxAge`] |

mod cache_control;
mod cors;
mod date;
mod pragma;
mod validators;
mod vary;

use http::header::{CONTENT_LOCATION, ORIGIN};
use http::{HeaderMap, HeaderName, Uri};

pub use cache_control::CacheDirectives;
pub use cors::CorsMaxAge;
pub use date::{Timestamps, parse_http_date};
pub use pragma::{Pragma, PragmaDirective, PragmaSource};
pub use validators::Validators;
pub use vary::Vary;

use crate::Exchange;

/// Everything the rule tables need to know about an exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeFacts {
    /// Parsed response `Cache-Control`; all-default when the header is absent.
    pub directives: CacheDirectives,
    /// Whether the response carried a `Cache-Control` header at all.
    pub has_cache_control: bool,
    /// Legacy `Pragma` directive from the response or the request.
    pub pragma: Option<Pragma>,
    pub validators: Validators,
    pub timestamps: Timestamps,
    pub vary: Vary,
    /// `Access-Control-Max-Age` of the response.
    pub cors_max_age: Option<CorsMaxAge>,
    /// The request carried an `Origin` header.
    pub has_origin: bool,
    /// The response `Content-Location` points at the requested URL.
    pub content_location_matches: bool,
}

impl ExchangeFacts {
    /// Interprets the headers of `exchange`.
    pub fn interpret(exchange: &Exchange) -> Self {
        let request = exchange.request_headers();
        let response = exchange.response_headers();
        let directives = CacheDirectives::from_headers(response);

        Self {
            has_cache_control: directives.is_some(),
            directives: directives.unwrap_or_default(),
            pragma: Pragma::from_headers(request, response),
            validators: Validators::from_headers(response),
            timestamps: Timestamps::from_headers(response),
            vary: Vary::from_headers(response),
            cors_max_age: CorsMaxAge::from_headers(response),
            has_origin: request.contains_key(ORIGIN),
            content_location_matches: first(response, &CONTENT_LOCATION)
                .is_some_and(|location| same_resource(location, exchange.path_and_query())),
        }
    }
}

/// Returns every value of `name` joined with `", "`.
///
/// Values that are not visible ASCII are skipped; `None` when no usable
/// value remains.
pub fn combined(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let values = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Returns the first usable value of `name`, trimmed.
pub fn first<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get_all(name)
        .iter()
        .find_map(|value| value.to_str().ok())
        .map(str::trim)
}

/// Splits a comma-separated header list, keeping commas inside quoted
/// strings. Empty elements are dropped.
///
/// A quote that is never closed does not protect the commas after it.
pub(crate) fn split_list(value: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (index, ch) in value.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => {
                items.push(value[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    if quoted {
        items.extend(value[start..].split(',').map(str::trim));
    } else {
        items.push(value[start..].trim());
    }
    items.retain(|item| !item.is_empty());
    items
}

/// Compares a `Content-Location` value with the request path and query.
/// Absolute locations are reduced to their path and query first.
fn same_resource(location: &str, path_and_query: &str) -> bool {
    let Ok(uri) = location.parse::<Uri>() else {
        return false;
    };
    let location = uri
        .path_and_query()
        .map(|location| location.as_str())
        .filter(|location| !location.is_empty())
        .unwrap_or("/");
    location == path_and_query
}

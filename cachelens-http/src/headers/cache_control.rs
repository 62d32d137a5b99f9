use http::HeaderMap;
use http::header::CACHE_CONTROL;
use tracing::trace;

use super::{combined, split_list};

/// Directives of a `Cache-Control` header.
///
/// Directive names are matched case-insensitively. Numeric directives keep
/// the first valid occurrence; a missing, negative or non-numeric argument
/// leaves the directive absent. Unknown directives are ignored.
///
/// ```
/// use cachelens_http::headers::CacheDirectives;
///
/// let directives = CacheDirectives::parse("public, max-age=\"60\", s-maxage=-1");
/// assert!(directives.public);
/// assert_eq!(directives.max_age, Some(60));
/// assert_eq!(directives.s_maxage, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheDirectives {
    pub no_store: bool,
    pub no_cache: bool,
    pub public: bool,
    pub private: bool,
    pub max_age: Option<u64>,
    pub s_maxage: Option<u64>,
    pub immutable: bool,
    pub must_revalidate: bool,
    pub proxy_revalidate: bool,
    pub no_transform: bool,
    pub must_understand: bool,
    pub stale_while_revalidate: Option<u64>,
    pub stale_if_error: Option<u64>,
}

impl CacheDirectives {
    /// Parses every `Cache-Control` line of `headers`; `None` when the
    /// header is absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        combined(headers, &CACHE_CONTROL).map(|value| Self::parse(&value))
    }

    pub fn parse(value: &str) -> Self {
        let mut directives = Self::default();

        for token in split_list(value) {
            let (name, argument) = match token.split_once('=') {
                Some((name, argument)) => (name.trim(), Some(unquote(argument.trim()))),
                None => (token, None),
            };

            match name.to_ascii_lowercase().as_str() {
                "no-store" => directives.no_store = true,
                // `no-cache` and `private` may carry a field-name list.
                "no-cache" => directives.no_cache = true,
                "private" => directives.private = true,
                "public" => directives.public = true,
                "immutable" => directives.immutable = true,
                "must-revalidate" => directives.must_revalidate = true,
                "proxy-revalidate" => directives.proxy_revalidate = true,
                "no-transform" => directives.no_transform = true,
                "must-understand" => directives.must_understand = true,
                "max-age" => set_seconds(&mut directives.max_age, name, argument),
                "s-maxage" => set_seconds(&mut directives.s_maxage, name, argument),
                "stale-while-revalidate" => {
                    set_seconds(&mut directives.stale_while_revalidate, name, argument)
                }
                "stale-if-error" => set_seconds(&mut directives.stale_if_error, name, argument),
                _ => trace!(directive = token, "ignoring unknown Cache-Control directive"),
            }
        }

        directives
    }
}

fn set_seconds(slot: &mut Option<u64>, name: &str, argument: Option<&str>) {
    if slot.is_some() {
        return;
    }
    match argument.and_then(delta_seconds) {
        Some(seconds) => *slot = Some(seconds),
        None => trace!(directive = name, ?argument, "ignoring malformed delta-seconds"),
    }
}

/// Parses `1*DIGIT`, saturating values too large to represent.
fn delta_seconds(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    Some(value.parse().unwrap_or(u64::MAX))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value)
}

use std::fmt;

use http::HeaderMap;
use http::header::PRAGMA;

use super::{combined, split_list};

/// Cache-related `Pragma` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PragmaDirective {
    NoStore,
    NoCache,
}

impl PragmaDirective {
    pub const fn as_str(self) -> &'static str {
        match self {
            PragmaDirective::NoStore => "no-store",
            PragmaDirective::NoCache => "no-cache",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("no-store") {
            Some(PragmaDirective::NoStore)
        } else if token.eq_ignore_ascii_case("no-cache") {
            Some(PragmaDirective::NoCache)
        } else {
            None
        }
    }
}

impl fmt::Display for PragmaDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the exchange carried the `Pragma` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PragmaSource {
    Request,
    Response,
}

impl PragmaSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            PragmaSource::Request => "request",
            PragmaSource::Response => "response",
        }
    }
}

/// A legacy HTTP/1.0 `Pragma` caching signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pragma {
    /// First cache-related token seen.
    pub directive: PragmaDirective,
    pub source: PragmaSource,
}

impl Pragma {
    /// Finds the first `no-store`/`no-cache` token in a `Pragma` value.
    pub fn parse(value: &str, source: PragmaSource) -> Option<Self> {
        split_list(value)
            .into_iter()
            .find_map(PragmaDirective::parse)
            .map(|directive| Pragma { directive, source })
    }

    /// Looks at the response first, then the request.
    pub fn from_headers(request: &HeaderMap, response: &HeaderMap) -> Option<Self> {
        let from = |headers: &HeaderMap, source| {
            combined(headers, &PRAGMA).and_then(|value| Pragma::parse(&value, source))
        };
        from(response, PragmaSource::Response).or_else(|| from(request, PragmaSource::Request))
    }
}

use http::HeaderMap;
use http::header::VARY;

use super::{combined, split_list};

/// Lower-cased field names listed in the response `Vary` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vary(Vec<String>);

impl Vary {
    pub fn parse(value: &str) -> Self {
        Self(
            split_list(value)
                .into_iter()
                .map(str::to_ascii_lowercase)
                .collect(),
        )
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        combined(headers, &VARY)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// `Vary: *`, alone or among other field names.
    pub fn is_wildcard(&self) -> bool {
        self.0.iter().any(|field| field == "*")
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

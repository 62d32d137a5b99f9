use http::HeaderMap;
use http::header::{ETAG, LAST_MODIFIED};

/// Presence of revalidation headers on the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validators {
    pub etag: bool,
    pub last_modified: bool,
}

impl Validators {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            etag: headers.contains_key(ETAG),
            last_modified: headers.contains_key(LAST_MODIFIED),
        }
    }

    /// At least one validator is present.
    pub fn any(&self) -> bool {
        self.etag || self.last_modified
    }
}

//! Status-code defaults, consulted only when a response has no explicit
//! freshness information.

use http::StatusCode;

/// Statuses describing a permanent state. Clients cache them indefinitely
/// unless told otherwise.
pub const PERMANENTLY_CACHEABLE: &[StatusCode] = &[
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::PERMANENT_REDIRECT,
    StatusCode::GONE,
    StatusCode::URI_TOO_LONG,
    StatusCode::NOT_IMPLEMENTED,
];

/// Statuses a cache may store with a heuristic lifetime.
pub const HEURISTICALLY_CACHEABLE: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::NON_AUTHORITATIVE_INFORMATION,
    StatusCode::NO_CONTENT,
    StatusCode::PARTIAL_CONTENT,
    StatusCode::MULTIPLE_CHOICES,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
];

/// Default cacheability of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDefault {
    Permanent,
    Heuristic,
    Uncacheable,
}

impl StatusDefault {
    pub fn of(status: StatusCode) -> Self {
        if PERMANENTLY_CACHEABLE.contains(&status) {
            StatusDefault::Permanent
        } else if HEURISTICALLY_CACHEABLE.contains(&status) {
            StatusDefault::Heuristic
        } else {
            StatusDefault::Uncacheable
        }
    }
}

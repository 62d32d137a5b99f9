//! The closed summary vocabulary.
//!
//! Every explanation is labelled with exactly one [`Summary`]. The set is
//! closed on purpose: rule tables match on it exhaustively, so adding a label
//! forces every consumer to decide how to handle it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One-line classification of an exchange's cacheability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Summary {
    /// A cache will store and reuse the response.
    #[serde(rename = "Cacheable")]
    Cacheable,
    /// No cache will store the response.
    #[serde(rename = "Not cacheable")]
    NotCacheable,
    /// Caches may store the response, with an unspecified lifetime.
    #[serde(rename = "Probably cacheable")]
    ProbablyCacheable,
    /// Caching is allowed in principle, but most caches won't.
    #[serde(rename = "Typically not cacheable")]
    TypicallyNotCacheable,
    /// CORS preflight responses cached for a short browser default.
    #[serde(rename = "Very briefly cacheable")]
    VeryBrieflyCacheable,
    /// A POST response reusable for later GET/HEAD requests.
    #[serde(rename = "May be cacheable for future GET/HEAD requests")]
    MayBeCacheableForGetHead,
    /// Only shared caches may store the response.
    #[serde(rename = "Not cacheable by private (HTTP client) caches")]
    NotCacheableByPrivateCaches,
}

impl Summary {
    /// Every label, in declaration order.
    pub const ALL: [Summary; 7] = [
        Summary::Cacheable,
        Summary::NotCacheable,
        Summary::ProbablyCacheable,
        Summary::TypicallyNotCacheable,
        Summary::VeryBrieflyCacheable,
        Summary::MayBeCacheableForGetHead,
        Summary::NotCacheableByPrivateCaches,
    ];

    /// Returns the human-readable label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Summary::Cacheable => "Cacheable",
            Summary::NotCacheable => "Not cacheable",
            Summary::ProbablyCacheable => "Probably cacheable",
            Summary::TypicallyNotCacheable => "Typically not cacheable",
            Summary::VeryBrieflyCacheable => "Very briefly cacheable",
            Summary::MayBeCacheableForGetHead => "May be cacheable for future GET/HEAD requests",
            Summary::NotCacheableByPrivateCaches => "Not cacheable by private (HTTP client) caches",
        }
    }

    /// Parses a label produced by [`Summary::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|summary| summary.as_str() == label)
    }

    /// Collapses the label into a tri-state answer.
    pub const fn cacheability(self) -> Cacheability {
        match self {
            Summary::Cacheable | Summary::VeryBrieflyCacheable => Cacheability::Yes,
            Summary::NotCacheable | Summary::NotCacheableByPrivateCaches => Cacheability::No,
            Summary::ProbablyCacheable
            | Summary::TypicallyNotCacheable
            | Summary::MayBeCacheableForGetHead => Cacheability::Maybe,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state answer to "will a private cache reuse this response?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cacheability {
    /// The response will be stored and reused.
    Yes,
    /// Storage depends on cache heuristics or on later requests.
    Maybe,
    /// The response will not be stored by a private cache.
    No,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for summary in Summary::ALL {
            assert_eq!(Summary::from_label(summary.as_str()), Some(summary));
        }
        assert_eq!(Summary::from_label("Definitely cacheable"), None);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Summary::MayBeCacheableForGetHead).unwrap();
        assert_eq!(json, "\"May be cacheable for future GET/HEAD requests\"");

        let summary: Summary = serde_json::from_str("\"Typically not cacheable\"").unwrap();
        assert_eq!(summary, Summary::TypicallyNotCacheable);
    }

    #[test]
    fn test_cacheability() {
        assert_eq!(Summary::VeryBrieflyCacheable.cacheability(), Cacheability::Yes);
        assert_eq!(
            Summary::NotCacheableByPrivateCaches.cacheability(),
            Cacheability::No
        );
        assert_eq!(
            Summary::TypicallyNotCacheable.cacheability(),
            Cacheability::Maybe
        );
    }
}

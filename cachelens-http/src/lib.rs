//! Cacheability explanations for captured HTTP exchanges.
//!
//! Given an [`Exchange`] (method, request headers, status code and response
//! headers), [`explain`] decides whether a private HTTP cache would store and
//! reuse the response, and says why.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Header interpretation | [`headers`] |
//! | Ordered decision table | [`rules::decision`] |
//! | Advisories | [`rules::advisory`] |
//! | Status-code defaults | [`rules::status`] |
//! | Composition | [`cachelens_core::Explanation`] |
//!
//! # Example
//!
//! ```
//! use cachelens_core::{Severity, Summary};
//! use cachelens_http::{Exchange, explain};
//! use http::HeaderValue;
//! use http::header::{CACHE_CONTROL, DATE};
//!
//! let exchange = Exchange::default()
//!     .with_response_header(CACHE_CONTROL, HeaderValue::from_static("max-age=60"))
//!     .with_response_header(DATE, HeaderValue::from_static("Thu, 01 Jan 2099 00:00:00 GMT"));
//!
//! let explained = explain(&exchange);
//! assert_eq!(explained.summary(), Summary::Cacheable);
//! // No ETag or Last-Modified: a validator is suggested.
//! assert_eq!(explained.kind(), Some(Severity::Suggestion));
//! ```

pub mod config;
mod exchange;
mod explainer;
pub mod headers;
pub mod rules;

pub use config::ExplainConfig;
pub use exchange::Exchange;
pub use explainer::{Explainer, Verdict, explain};
pub use rules::Rule;

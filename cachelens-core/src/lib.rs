#![warn(missing_docs)]
//! # cachelens-core
//!
//! Core types for the Cachelens cacheability explainer.
//!
//! This crate is **protocol-agnostic**: it knows nothing about headers or
//! status codes. It defines the closed vocabulary an explanation is written
//! in and the composer that turns ordered explanation fragments into the
//! final [`Explained`] result.
//!
//! ## Architecture
//!
//! Protocol crates (like `cachelens-http`) interpret an exchange and run
//! their rules. Each rule contributes [`Fragment`]s to an [`Explanation`]:
//!
//! - The **primary** fragment fixes the [`Summary`]
//! - **Advisory** fragments append extra text and may carry a [`Severity`]
//! - [`Explanation::compose`] joins the text and resolves the overall severity
//!
//! ```
//! use cachelens_core::{Explanation, Fragment, Severity, Summary};
//!
//! let mut explanation = Explanation::new(
//!     Summary::Cacheable,
//!     Fragment::new("This response has a max-age of 60 seconds."),
//! );
//! explanation.push(Fragment::suggestion("Consider adding an ETag header."));
//!
//! let explained = explanation.compose();
//! assert_eq!(explained.summary(), Summary::Cacheable);
//! assert_eq!(explained.kind(), Some(Severity::Suggestion));
//! ```

pub mod explanation;
pub mod severity;
pub mod summary;

pub use explanation::{Explained, Explanation, Fragment};
pub use severity::Severity;
pub use summary::{Cacheability, Summary};

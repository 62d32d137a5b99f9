use thiserror::Error;

/// Failure to resolve a `$ref` pointer.
///
/// Reference errors carry the reference as written in the document, so the
/// caller can point at the offending node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot resolve external reference {reference}")]
    External { reference: String },

    #[error("could not follow ref {reference}, failed at {segment}")]
    Missing { reference: String, segment: String },

    #[error("reference {reference} points back into itself")]
    Cycle { reference: String },

    #[error("resolved document exceeds {limit} nodes")]
    TooLarge { limit: usize },
}

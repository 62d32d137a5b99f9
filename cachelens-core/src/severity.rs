//! Severity attached to explanation fragments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly an explanation asks for a change to the response.
///
/// Serialized in lower case (`"suggestion"`, `"warning"`), matching the
/// `type` field of an [`Explained`](crate::Explained) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The response works, but could be cached better.
    Suggestion,
    /// Cache behaviour is likely to surprise: clients have to guess.
    Warning,
}

impl Severity {
    /// Returns the wire name of the severity.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

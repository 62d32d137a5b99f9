//! Explanation fragments and the result composer.
//!
//! An [`Explanation`] is built from one primary [`Fragment`], which fixes the
//! [`Summary`], followed by any number of advisory fragments. Fragments are
//! append-only: once pushed they are never reordered or removed.
//!
//! [`Explanation::compose`] produces the final [`Explained`] value:
//!
//! - fragment text is whitespace-normalized and joined by a blank line
//! - the overall severity is the severity of the **first** fragment that
//!   carries one; later severities are kept as text only

use serde::Serialize;

use crate::{Cacheability, Severity, Summary};

const FRAGMENT_SEPARATOR: &str = "\n\n";

/// A piece of explanation text with an optional severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    severity: Option<Severity>,
}

impl Fragment {
    /// Creates an informational fragment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: None,
        }
    }

    /// Creates a fragment carrying [`Severity::Suggestion`].
    pub fn suggestion(text: impl Into<String>) -> Self {
        Self::new(text).with_severity(Severity::Suggestion)
    }

    /// Creates a fragment carrying [`Severity::Warning`].
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text).with_severity(Severity::Warning)
    }

    /// Attaches a severity to the fragment.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Raw fragment text, as written by the rule.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Severity proposed by the fragment, if any.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    fn normalized(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Ordered collection of fragments for a single exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    summary: Summary,
    fragments: Vec<Fragment>,
}

impl Explanation {
    /// Starts an explanation from the fragment of the rule that decided it.
    pub fn new(summary: Summary, primary: Fragment) -> Self {
        Self {
            summary,
            fragments: vec![primary],
        }
    }

    /// Appends an advisory fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// The summary fixed by the primary fragment.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// All fragments in the order they were added.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Resolves the overall severity: first severity-bearing fragment wins.
    pub fn severity(&self) -> Option<Severity> {
        self.fragments
            .iter()
            .fold(None, |resolved, fragment| resolved.or(fragment.severity))
    }

    /// Joins the fragments into the final, immutable result.
    pub fn compose(self) -> Explained {
        let kind = self.severity();
        let explanation = self
            .fragments
            .iter()
            .map(Fragment::normalized)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR);

        Explained {
            summary: self.summary,
            kind,
            explanation,
        }
    }
}

impl Extend<Fragment> for Explanation {
    fn extend<I: IntoIterator<Item = Fragment>>(&mut self, iter: I) {
        self.fragments.extend(iter);
    }
}

/// The outcome of explaining one exchange.
///
/// Serializes as `{"summary": ..., "type": ..., "explanation": ...}`, with
/// `type` omitted when no fragment proposed a severity.
///
/// The only way to obtain one is [`Explanation::compose`]. It cannot be read
/// back from JSON:
///
/// ```compile_fail
/// let explained: cachelens_core::Explained =
///     serde_json::from_str(r#"{"summary": "Cacheable", "explanation": ""}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explained {
    summary: Summary,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<Severity>,
    explanation: String,
}

impl Explained {
    /// The summary label.
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// The overall severity, absent when nothing needs attention.
    pub fn kind(&self) -> Option<Severity> {
        self.kind
    }

    /// Human-readable justification.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Tri-state view of the summary.
    pub fn cacheability(&self) -> Cacheability {
        self.summary.cacheability()
    }
}

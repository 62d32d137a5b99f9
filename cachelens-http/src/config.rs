//! Explainer settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One year, the conventional lifetime of versioned static assets.
pub const DEFAULT_IMMUTABLE_THRESHOLD: Duration = Duration::from_secs(31_536_000);

/// Settings for [`Explainer`](crate::Explainer).
///
/// Durations use human-readable notation in configuration files:
///
/// ```
/// use std::time::Duration;
/// use cachelens_http::ExplainConfig;
///
/// let config: ExplainConfig = serde_json::from_str(r#"{"immutable_threshold": "30days"}"#).unwrap();
/// assert_eq!(config.immutable_threshold, Duration::from_secs(30 * 86_400));
///
/// let config: ExplainConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, ExplainConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// `max-age` at or above which the `immutable` directive is suggested.
    #[serde(default = "default_immutable_threshold", with = "humantime_serde")]
    pub immutable_threshold: Duration,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            immutable_threshold: DEFAULT_IMMUTABLE_THRESHOLD,
        }
    }
}

fn default_immutable_threshold() -> Duration {
    DEFAULT_IMMUTABLE_THRESHOLD
}

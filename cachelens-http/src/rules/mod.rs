//! Rule tables.
//!
//! Rules are evaluated as an ordered decision list: the first rule that holds
//! fixes the [`Summary`](cachelens_core::Summary) and the primary fragment.
//! A few rules then run advisories that append further fragments.
//!
//! | Priority | Rule | Advisories |
//! |---------:|------|------------|
//! | 1 | [`Rule::UncacheableMethod`] | - |
//! | 2 | [`Rule::PreflightWithMaxAge`], [`Rule::PreflightDefault`] | - |
//! | 3 | [`Rule::PostReusable`], [`Rule::PostNotReusable`] | - |
//! | 4 | [`Rule::NoStore`] | - |
//! | 5 | [`Rule::LegacyPragma`] | move to `Cache-Control` |
//! | 6 | [`Rule::VaryWildcard`] | - |
//! | 7 | [`Rule::SharedMaxAgeOnly`] | - |
//! | 8 | [`Rule::MaxAge`] | `Date`, `immutable`, validators |
//! | 9 | [`Rule::Expires`] | prefer `max-age` |
//! | 10 | [`Rule::PermanentStatus`], [`Rule::HeuristicWithSignals`], [`Rule::HeuristicWithoutSignals`], [`Rule::UncacheableStatus`] | - |

use std::fmt;

pub mod advisory;
pub mod decision;
pub mod status;

/// The rule of the decision table that classified an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Methods other than GET, HEAD, POST and CORS preflight OPTIONS.
    UncacheableMethod,
    /// CORS preflight with `Access-Control-Max-Age`.
    PreflightWithMaxAge,
    /// CORS preflight relying on the browser default.
    PreflightDefault,
    /// POST response reusable for later GET/HEAD requests.
    PostReusable,
    /// POST response without explicit freshness or `Content-Location`.
    PostNotReusable,
    /// `Cache-Control: no-store`.
    NoStore,
    /// `Pragma: no-store` or `Pragma: no-cache` without `Cache-Control`.
    LegacyPragma,
    /// `Vary: *`.
    VaryWildcard,
    /// `s-maxage` without `max-age`.
    SharedMaxAgeOnly,
    /// Explicit `max-age`.
    MaxAge,
    /// Parseable `Expires` without `max-age`.
    Expires,
    /// Status cached indefinitely by default.
    PermanentStatus,
    /// Heuristically cacheable status with `public` or a validator.
    HeuristicWithSignals,
    /// Heuristically cacheable status with nothing to go on.
    HeuristicWithoutSignals,
    /// Status that is never cacheable without explicit freshness.
    UncacheableStatus,
}

impl Rule {
    /// Stable identifier, used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Rule::UncacheableMethod => "uncacheable-method",
            Rule::PreflightWithMaxAge => "preflight-max-age",
            Rule::PreflightDefault => "preflight-default",
            Rule::PostReusable => "post-reusable",
            Rule::PostNotReusable => "post-not-reusable",
            Rule::NoStore => "no-store",
            Rule::LegacyPragma => "legacy-pragma",
            Rule::VaryWildcard => "vary-wildcard",
            Rule::SharedMaxAgeOnly => "s-maxage-only",
            Rule::MaxAge => "max-age",
            Rule::Expires => "expires",
            Rule::PermanentStatus => "permanent-status",
            Rule::HeuristicWithSignals => "heuristic-with-signals",
            Rule::HeuristicWithoutSignals => "heuristic-without-signals",
            Rule::UncacheableStatus => "uncacheable-status",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! The baseline decision table.

use std::time::Duration;

use cachelens_core::{Fragment, Summary};
use http::{Method, StatusCode};

use super::Rule;
use super::status::StatusDefault;
use crate::Exchange;
use crate::headers::{CacheDirectives, ExchangeFacts, PragmaSource};

/// Request methods with dedicated handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodKind {
    Read,
    Post,
    Options,
    Other,
}

impl MethodKind {
    fn of(method: &Method) -> Self {
        match *method {
            Method::GET | Method::HEAD => MethodKind::Read,
            Method::POST => MethodKind::Post,
            Method::OPTIONS => MethodKind::Options,
            _ => MethodKind::Other,
        }
    }
}

/// Finds the first rule that holds for the exchange.
pub fn classify(exchange: &Exchange, facts: &ExchangeFacts) -> Rule {
    match MethodKind::of(exchange.method()) {
        MethodKind::Other => Rule::UncacheableMethod,
        MethodKind::Options if !facts.has_origin => Rule::UncacheableMethod,
        MethodKind::Options if facts.cors_max_age.is_some() => Rule::PreflightWithMaxAge,
        MethodKind::Options => Rule::PreflightDefault,
        MethodKind::Post if post_is_reusable(facts) => Rule::PostReusable,
        MethodKind::Post => Rule::PostNotReusable,
        MethodKind::Read => classify_read(exchange.status(), facts),
    }
}

fn classify_read(status: StatusCode, facts: &ExchangeFacts) -> Rule {
    let directives = &facts.directives;

    if directives.no_store {
        return Rule::NoStore;
    }
    if facts.pragma.is_some() && !facts.has_cache_control {
        return Rule::LegacyPragma;
    }
    if facts.vary.is_wildcard() {
        return Rule::VaryWildcard;
    }

    match (directives.max_age, directives.s_maxage, facts.timestamps.expires) {
        (Some(_), _, _) => Rule::MaxAge,
        (None, Some(_), _) => Rule::SharedMaxAgeOnly,
        (None, None, Some(_)) => Rule::Expires,
        (None, None, None) => match StatusDefault::of(status) {
            StatusDefault::Permanent => Rule::PermanentStatus,
            StatusDefault::Heuristic if has_heuristic_signals(facts) => Rule::HeuristicWithSignals,
            StatusDefault::Heuristic => Rule::HeuristicWithoutSignals,
            StatusDefault::Uncacheable if directives.public => Rule::HeuristicWithSignals,
            StatusDefault::Uncacheable => Rule::UncacheableStatus,
        },
    }
}

/// Explicit freshness plus a `Content-Location` identifying the resource.
fn post_is_reusable(facts: &ExchangeFacts) -> bool {
    let directives = &facts.directives;
    let fresh = directives.public || directives.max_age.is_some() || facts.timestamps.expires.is_some();
    !directives.no_store && fresh && facts.content_location_matches
}

fn has_heuristic_signals(facts: &ExchangeFacts) -> bool {
    facts.directives.public || facts.validators.any()
}

impl Rule {
    /// The summary fixed by the rule.
    pub const fn summary(self) -> Summary {
        match self {
            Rule::PreflightWithMaxAge
            | Rule::MaxAge
            | Rule::Expires
            | Rule::PermanentStatus => Summary::Cacheable,
            Rule::UncacheableMethod
            | Rule::PostNotReusable
            | Rule::NoStore
            | Rule::LegacyPragma
            | Rule::VaryWildcard
            | Rule::UncacheableStatus => Summary::NotCacheable,
            Rule::PreflightDefault => Summary::VeryBrieflyCacheable,
            Rule::PostReusable => Summary::MayBeCacheableForGetHead,
            Rule::SharedMaxAgeOnly => Summary::NotCacheableByPrivateCaches,
            Rule::HeuristicWithSignals => Summary::ProbablyCacheable,
            Rule::HeuristicWithoutSignals => Summary::TypicallyNotCacheable,
        }
    }
}

/// Writes the primary fragment of `rule`.
pub fn primary(rule: Rule, exchange: &Exchange, facts: &ExchangeFacts) -> Fragment {
    let directives = &facts.directives;
    let status = exchange.status().as_u16();

    match rule {
        Rule::UncacheableMethod => Fragment::new(format!(
            "{} requests are never cacheable.",
            exchange.method()
        )),
        Rule::PreflightWithMaxAge => {
            let lifetime = facts
                .cors_max_age
                .and_then(|max_age| max_age.seconds())
                .map(|seconds| {
                    format!(" Browsers will reuse this preflight result for up to {}.", describe_seconds(seconds))
                })
                .unwrap_or_default();
            Fragment::new(format!(
                "OPTIONS requests are not cacheable in general, but CORS preflight responses \
                 will be cached if an Access-Control-Max-Age header is provided, as here.{lifetime} \
                 Browsers cap this value at their own maximum, which varies between a few \
                 minutes and a day."
            ))
        }
        Rule::PreflightDefault => Fragment::new(
            "OPTIONS preflight requests are not cacheable, unless an Access-Control-Max-Age \
             header is provided. Without one, browsers apply a short default of around 5 \
             seconds, so this preflight will only be reused by requests made immediately \
             afterwards.",
        ),
        Rule::PostReusable => Fragment::new(format!(
            "{POST_CONDITIONS} This response fulfills those conditions, so its content may be \
             reused to answer future GET and HEAD requests for {}.",
            exchange.path_and_query()
        )),
        Rule::PostNotReusable => Fragment::new(format!(
            "{POST_CONDITIONS} This response does not fulfill those conditions."
        )),
        Rule::NoStore => Fragment::new(
            "This response includes a `no-store` Cache-Control directive, which tells every \
             cache never to store it.",
        ),
        Rule::LegacyPragma => {
            let (directive, source) = facts
                .pragma
                .map(|pragma| (pragma.directive.as_str(), pragma.source))
                .unwrap_or(("no-cache", PragmaSource::Response));
            Fragment::new(format!(
                "This {} includes a `Pragma: {directive}` header. Pragma is an HTTP/1.0 \
                 header that caches only honour when no Cache-Control header is present. \
                 There is none here, so this response will not be cached.",
                source.as_str(),
            ))
        }
        Rule::VaryWildcard => Fragment::new(
            "This response includes a `Vary: *` header, which says that it depends on details \
             of the request beyond its headers. No cache can tell whether a later request \
             matches, so the response is never reused, regardless of any freshness or \
             validation headers.",
        ),
        Rule::SharedMaxAgeOnly => Fragment::new(format!(
            "This response includes an `s-maxage` directive of {}, but no `max-age`. \
             `s-maxage` only applies to shared caches such as proxies and CDNs, so private \
             (HTTP client) caches like browsers will not store it.",
            describe_seconds(directives.s_maxage.unwrap_or_default()),
        )),
        Rule::MaxAge => Fragment::new(format!(
            "This response is cacheable because it includes a `max-age` directive: caches may \
             reuse it for {} after it was generated.{}",
            describe_seconds(directives.max_age.unwrap_or_default()),
            revalidation_note(directives).unwrap_or_default(),
        )),
        Rule::Expires => {
            let raw = crate::headers::first(exchange.response_headers(), &http::header::EXPIRES)
                .unwrap_or_default();
            let stale = match facts.timestamps.expires_in() {
                Some(seconds) if seconds <= 0 => {
                    " That time is not after the response's Date header, so it is stale as soon \
                     as it is stored."
                }
                _ => "",
            };
            Fragment::new(format!(
                "This response is cacheable because it includes an `Expires` header, which \
                 says it stays fresh until {raw}.{stale}"
            ))
        }
        Rule::PermanentStatus => Fragment::new(format!(
            "{status} responses are cacheable by default. With no explicit caching headers \
             saying otherwise, clients will cache it forever, reusing it indefinitely."
        )),
        Rule::HeuristicWithSignals => {
            let reason = if StatusDefault::of(exchange.status()) == StatusDefault::Heuristic {
                format!("{status} responses are cacheable by default")
            } else {
                "This response includes the `public` Cache-Control directive, so it may be cached"
                    .to_string()
            };
            let validators = if facts.validators.any() {
                " Caches that store it can revalidate it later using its validator headers."
            } else {
                ""
            };
            Fragment::warning(format!(
                "{reason}, but it has no explicit freshness information (a `max-age` \
                 directive or an Expires header), so its expiry behaviour is not well \
                 specified. Each cache picks its own heuristic lifetime, typically a fraction \
                 of the time since the Last-Modified date.{validators}{}",
                revalidation_note(directives).unwrap_or_default(),
            ))
        }
        Rule::HeuristicWithoutSignals => Fragment::warning(format!(
            "{status} responses are cacheable by default, but without explicit freshness \
             information or a validator (an ETag or Last-Modified header), most caches will \
             not store a response like this."
        )),
        Rule::UncacheableStatus => Fragment::new(format!(
            "{status} responses are not cacheable by default, and this response has no \
             explicit freshness information that would make it cacheable."
        )),
    }
}

const POST_CONDITIONS: &str = "POST responses are not typically cacheable. They can only be \
     reused for future GET and HEAD requests if they include explicit freshness information \
     (a `public` or `max-age` Cache-Control directive, or an Expires header) and a \
     Content-Location header with the same URL as the request.";

fn revalidation_note(directives: &CacheDirectives) -> Option<&'static str> {
    if directives.no_cache {
        Some(
            " It also includes a `no-cache` directive, so caches must check with the server \
             before every reuse.",
        )
    } else if directives.must_revalidate {
        Some(
            " It also includes a `must-revalidate` directive, so once stale it must never be \
             reused without checking with the server.",
        )
    } else if directives.private {
        Some(" It is marked `private`, so only the client's own cache may store it.")
    } else {
        None
    }
}

const SECONDS_PER_DAY: u64 = 86_400;

/// `humantime` counts months of 30.44 days; below 30 days its output is exact.
const EXACT_SPAN: u64 = 30 * SECONDS_PER_DAY;

/// `60 seconds`, `3600 seconds (1h)`, or `31536000 seconds (365 days)` for
/// periods of a month or more, which are rounded down to whole days.
pub(crate) fn describe_seconds(seconds: u64) -> String {
    let plural = if seconds == 1 { "" } else { "s" };
    if seconds < 60 {
        format!("{seconds} second{plural}")
    } else if seconds < EXACT_SPAN {
        format!(
            "{seconds} second{plural} ({})",
            humantime::format_duration(Duration::from_secs(seconds))
        )
    } else {
        let days = seconds / SECONDS_PER_DAY;
        let about = if seconds % SECONDS_PER_DAY == 0 { "" } else { "about " };
        format!("{seconds} seconds ({about}{days} days)")
    }
}

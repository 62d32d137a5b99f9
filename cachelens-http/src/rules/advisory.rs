//! Advisories appended after the primary fragment.
//!
//! Each advisory is an optional fragment; the candidates of a rule are listed
//! in priority order and every one that fires is kept. The overall severity
//! is resolved later by [`Explanation::compose`](cachelens_core::Explanation::compose),
//! where the first severity-bearing fragment wins.

use cachelens_core::Fragment;

use super::Rule;
use super::decision::describe_seconds;
use crate::ExplainConfig;
use crate::headers::ExchangeFacts;

/// Advisory fragments for `rule`, in priority order.
pub fn advise(rule: Rule, facts: &ExchangeFacts, config: &ExplainConfig) -> Vec<Fragment> {
    match rule {
        Rule::MaxAge => max_age(facts, config),
        Rule::LegacyPragma => legacy_pragma(facts),
        Rule::Expires => vec![expires()],
        _ => Vec::new(),
    }
}

fn max_age(facts: &ExchangeFacts, config: &ExplainConfig) -> Vec<Fragment> {
    let max_age = facts.directives.max_age.unwrap_or_default();
    let threshold = config.immutable_threshold.as_secs();

    [
        facts.timestamps.date.is_none().then(|| {
            Fragment::warning(
                "This response has no valid `Date` header. A cache computes the age of a \
                 response from its Date header, so without one clients have to guess when it \
                 was generated, and its freshness lifetime becomes unreliable. Including a \
                 Date header is strongly recommended.",
            )
        }),
        (max_age >= threshold && !facts.directives.immutable).then(|| {
            Fragment::suggestion(format!(
                "This response is fresh for at least {}. If its content will never change \
                 at this URL, consider adding the `immutable` Cache-Control directive, so \
                 browsers skip revalidation even when the user reloads the page.",
                describe_seconds(threshold),
            ))
        }),
        (!facts.validators.any()).then(|| {
            Fragment::suggestion(
                "This response has neither an ETag nor a Last-Modified header. Once it \
                 expires, caches must download it again in full. Adding an ETag lets them \
                 revalidate it with a cheap conditional request instead.",
            )
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn legacy_pragma(facts: &ExchangeFacts) -> Vec<Fragment> {
    let directive = facts
        .pragma
        .map(|pragma| pragma.directive.as_str())
        .unwrap_or("no-cache");
    vec![Fragment::suggestion(format!(
        "Pragma is a legacy header that caches ignore whenever a Cache-Control header is \
         present. Consider replacing it with an equivalent `Cache-Control: {directive}` \
         directive."
    ))]
}

fn expires() -> Fragment {
    Fragment::suggestion(
        "The Expires header is a legacy mechanism that relies on the server and client clocks \
         agreeing. Consider using a `max-age` Cache-Control directive instead, which is \
         relative to the moment the response was generated.",
    )
}

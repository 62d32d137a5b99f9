use cachelens_core::{Cacheability, Explained, Severity, Summary};
use cachelens_http::{Exchange, ExplainConfig, Explainer, Rule, explain};
use http::header::{CACHE_CONTROL, DATE as DATE_HEADER};
use http::{HeaderValue, Method, Request, Response};

/// Helper to build an exchange the way a capture would: from real parts.
fn exchange(method: &str, uri: &str, status: u16, request: &[(&str, &str)], response: &[(&str, &str)]) -> Exchange {
    let mut request_builder = Request::builder().method(method).uri(uri);
    for (name, value) in request {
        request_builder = request_builder.header(*name, *value);
    }
    let mut response_builder = Response::builder().status(status);
    for (name, value) in response {
        response_builder = response_builder.header(*name, *value);
    }
    let (request, _) = request_builder.body(()).unwrap().into_parts();
    let (response, _) = response_builder.body(()).unwrap().into_parts();
    Exchange::from_parts(&request, &response)
}

fn get(status: u16, response: &[(&str, &str)]) -> Exchange {
    exchange("GET", "/", status, &[], response)
}

/// Explanations are wrapped text; compare on a single line.
fn flat(explained: &Explained) -> String {
    explained.explanation().replace('\n', " ")
}

const DATE: (&str, &str) = ("date", "Thu, 01 Jan 2099 00:00:00 GMT");

#[cfg(test)]
mod default_tests {
    use super::*;

    #[test]
    fn test_get_200_without_headers() {
        let result = explain(&get(200, &[]));
        assert_eq!(result.summary(), Summary::TypicallyNotCacheable);
        assert_eq!(result.kind(), Some(Severity::Warning));
        assert!(result.explanation().contains("200 responses are cacheable by default"));
        assert!(flat(&result).contains("most caches will not store a response like this"));
    }

    #[test]
    fn test_get_500_without_headers() {
        let result = explain(&get(500, &[]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert_eq!(result.kind(), None);
        assert!(result.explanation().contains("500"));
    }

    #[test]
    fn test_permanent_redirect() {
        let result = explain(&get(301, &[]));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), None);
        assert!(result.explanation().contains("301 responses are cacheable by default"));
        assert!(flat(&result).contains("clients will cache it forever"));
        assert_ne!(result, explain(&get(200, &[])));
    }

    #[test]
    fn test_last_modified_is_probably_cacheable() {
        let result = explain(&get(200, &[("last-modified", "Fri, 22 Mar 2019 11:54:00 GMT")]));
        assert_eq!(result.summary(), Summary::ProbablyCacheable);
        assert_eq!(result.kind(), Some(Severity::Warning));
        assert!(result.explanation().contains("200 responses are cacheable by default"));
        assert!(flat(&result).contains("expiry behaviour is not well specified"));
    }

    #[test]
    fn test_public_401_with_etag() {
        let result = explain(&get(401, &[("cache-control", "public"), ("etag", "abcdef")]));
        assert_eq!(result.summary(), Summary::ProbablyCacheable);
        assert_eq!(result.kind(), Some(Severity::Warning));
        assert!(result.explanation().contains("`public` Cache-Control directive"));
        assert!(flat(&result).contains("expiry behaviour is not well specified"));
    }
}

#[cfg(test)]
mod max_age_tests {
    use super::*;

    #[test]
    fn test_max_age_with_date_and_etag() {
        let result = explain(&get(
            200,
            &[DATE, ("etag", "tagtagtag"), ("cache-control", "max-age=60")],
        ));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), None);
        assert!(!result.explanation().contains("validation"));
    }

    #[test]
    fn test_max_age_suggests_validator() {
        let result = explain(&get(200, &[DATE, ("cache-control", "max-age=60")]));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), Some(Severity::Suggestion));
        assert!(result.explanation().contains("max-age"));
        assert!(result.explanation().contains("ETag"));
    }

    #[test]
    fn test_one_year_suggests_immutable() {
        let result = explain(&get(
            200,
            &[DATE, ("etag", "fedcba"), ("cache-control", "max-age=31536000")],
        ));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), Some(Severity::Suggestion));
        assert!(result.explanation().contains("max-age"));
        assert!(result.explanation().contains("immutable"));
    }

    #[test]
    fn test_immutable_present() {
        let result = explain(&get(
            200,
            &[DATE, ("etag", "fedcba"), ("cache-control", "max-age=31536000, immutable")],
        ));
        assert_eq!(result.kind(), None);
    }

    #[test]
    fn test_missing_date_dominates() {
        let result = explain(&get(200, &[("cache-control", "max-age=60")]));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), Some(Severity::Warning));
        assert!(result.explanation().contains("max-age"));
        assert!(result.explanation().contains("Date"));
        // The validator suggestion is still explained, it just doesn't set the type.
        assert!(result.explanation().contains("ETag"));
    }

    #[test]
    fn test_max_age_beats_expires() {
        let result = explain(&get(
            200,
            &[("cache-control", "max-age=60"), ("expires", "Thu, 01 Jan 2099 00:00:00 GMT")],
        ));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert!(result.explanation().contains("max-age"));
        assert!(!result.explanation().contains("Expires header is a legacy"));
    }

    #[test]
    fn test_max_age_on_error_status() {
        let result = explain(&get(500, &[DATE, ("etag", "x"), ("cache-control", "max-age=5")]));
        assert_eq!(result.summary(), Summary::Cacheable);
    }
}

#[cfg(test)]
mod directive_tests {
    use super::*;

    #[test]
    fn test_expires_suggests_max_age() {
        let result = explain(&get(200, &[("expires", "Thu, 1 Jan 2099 00:00:00 GMT")]));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert_eq!(result.kind(), Some(Severity::Suggestion));
        assert!(result.explanation().contains("Expires"));
        assert!(result.explanation().contains("max-age"));
    }

    #[test]
    fn test_s_maxage_only() {
        let result = explain(&get(500, &[("cache-control", "s-maxage=60")]));
        assert_eq!(result.summary(), Summary::NotCacheableByPrivateCaches);
        assert!(result.explanation().contains("s-maxage"));
    }

    #[test]
    fn test_no_store() {
        let result = explain(&get(200, &[("cache-control", "no-store")]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert_eq!(result.kind(), None);
        assert!(result.explanation().contains("no-store"));
    }

    #[test]
    fn test_pragma_no_store() {
        let result = explain(&get(200, &[("pragma", "no-store")]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert_eq!(result.kind(), Some(Severity::Suggestion));
        assert!(result.explanation().contains("no-store"));
        assert!(result.explanation().contains("Pragma"));
        assert!(flat(&result).contains("only honour when no Cache-Control header is present"));
        assert!(flat(&result).contains("caches ignore whenever a Cache-Control header is present"));
    }

    #[test]
    fn test_vary_wildcard() {
        let result = explain(&get(200, &[("etag", "123abc"), ("vary", "*")]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert!(result.explanation().contains("Vary"));
    }

    #[test]
    fn test_unterminated_quote_does_not_hide_no_store() {
        let result = explain(&get(
            200,
            &[DATE, ("etag", "a"), ("cache-control", r#"max-age="60, no-store"#)],
        ));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert!(result.explanation().contains("no-store"));
    }

    #[test]
    fn test_opaque_header_values_are_ignored() {
        let opaque = HeaderValue::from_bytes(b"no-store\xff").unwrap();
        let with_opaque_cache_control = get(200, &[]).with_response_header(CACHE_CONTROL, opaque);
        assert_eq!(explain(&with_opaque_cache_control), explain(&get(200, &[])));

        let opaque_date = HeaderValue::from_bytes(b"Thu, 01 Jan 2099\xff").unwrap();
        let with_opaque_date = get(200, &[("etag", "a"), ("cache-control", "max-age=60")])
            .with_response_header(DATE_HEADER, opaque_date);
        assert_eq!(
            explain(&with_opaque_date),
            explain(&get(200, &[("etag", "a"), ("cache-control", "max-age=60")]))
        );
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let lower = explain(&get(200, &[DATE, ("etag", "a"), ("cache-control", "max-age=60")]));
        let mixed = explain(&get(
            200,
            &[("Date", DATE.1), ("ETag", "a"), ("Cache-Control", "MAX-AGE=60")],
        ));
        assert_eq!(lower, mixed);
    }
}

#[cfg(test)]
mod method_tests {
    use super::*;

    #[test]
    fn test_delete() {
        let result = explain(&exchange("DELETE", "/", 200, &[], &[("cache-control", "max-age=60")]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert!(result.explanation().contains("DELETE requests are never cacheable"));
    }

    #[test]
    fn test_put_and_patch() {
        for method in [Method::PUT, Method::PATCH] {
            let result = explain(&exchange(method.as_str(), "/", 200, &[], &[]));
            assert_eq!(result.summary(), Summary::NotCacheable);
            assert!(result.explanation().contains(method.as_str()));
        }
    }

    #[test]
    fn test_post_without_headers() {
        let result = explain(&exchange("POST", "/", 200, &[], &[]));
        assert_eq!(result.summary(), Summary::NotCacheable);
        assert!(result.explanation().contains("POST responses are not typically cacheable"));
        assert!(result.explanation().contains("This response does not fulfill those conditions"));
    }

    #[test]
    fn test_post_with_caching_headers() {
        let result = explain(&exchange(
            "POST",
            "/abc?a=b",
            200,
            &[],
            &[("cache-control", "public, max-age=10000"), ("content-location", "/abc?a=b")],
        ));
        assert_eq!(result.summary(), Summary::MayBeCacheableForGetHead);
        assert!(result.explanation().contains("POST responses are not typically cacheable"));
        assert!(result.explanation().contains("This response fulfills those conditions"));
    }

    #[test]
    fn test_post_with_other_content_location() {
        let result = explain(&exchange(
            "POST",
            "/abc?a=b",
            200,
            &[],
            &[("cache-control", "public, max-age=10000"), ("content-location", "/abc")],
        ));
        assert_eq!(result.summary(), Summary::NotCacheable);
    }

    #[test]
    fn test_preflight_without_max_age() {
        let result = explain(&exchange(
            "OPTIONS",
            "/",
            200,
            &[("origin", "http://example2.com")],
            &[],
        ));
        assert_eq!(result.summary(), Summary::VeryBrieflyCacheable);
        assert!(flat(&result).contains(
            "OPTIONS preflight requests are not cacheable, unless an Access-Control-Max-Age header is provided"
        ));
    }

    #[test]
    fn test_preflight_with_max_age() {
        let result = explain(&exchange(
            "OPTIONS",
            "/",
            200,
            &[("origin", "http://example2.com")],
            &[("access-control-max-age", "600")],
        ));
        assert_eq!(result.summary(), Summary::Cacheable);
        assert!(flat(&result).contains(
            "will be cached if an Access-Control-Max-Age header is provided, as here"
        ));
        assert!(result.explanation().contains("600 seconds"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    fn corpus() -> Vec<Exchange> {
        let methods = ["GET", "HEAD", "POST", "OPTIONS", "DELETE", "PURGE"];
        let statuses = [200, 204, 301, 302, 404, 410, 500];
        let headers: [&[(&str, &str)]; 6] = [
            &[],
            &[("cache-control", "max-age=60")],
            &[("cache-control", "no-store"), ("pragma", "no-cache")],
            &[("expires", "0"), ("etag", "x")],
            &[("vary", "accept, *"), ("cache-control", "public")],
            &[("cache-control", "s-maxage=10, max-age=abc"), DATE],
        ];

        let mut exchanges = Vec::new();
        for method in methods {
            for status in statuses {
                for response in headers {
                    exchanges.push(exchange(method, "/", status, &[("origin", "https://a.example")], response));
                    exchanges.push(exchange(method, "/", status, &[], response));
                }
            }
        }
        exchanges
    }

    #[test]
    fn test_explanation_never_empty() {
        for exchange in corpus() {
            let result = explain(&exchange);
            assert!(!result.explanation().is_empty(), "{exchange:?}");
            assert!(Summary::ALL.contains(&result.summary()));
        }
    }

    #[test]
    fn test_idempotent() {
        for exchange in corpus() {
            assert_eq!(explain(&exchange), explain(&exchange));
        }
    }

    #[test]
    fn test_verdict_rule_matches_summary() {
        let explainer = Explainer::new(ExplainConfig::default());
        for exchange in corpus() {
            let verdict = explainer.verdict(&exchange);
            assert_eq!(verdict.rule.summary(), verdict.explained.summary());
        }
    }

    #[test]
    fn test_cacheability() {
        let verdict = Explainer::default().verdict(&get(200, &[("cache-control", "no-store")]));
        assert_eq!(verdict.rule, Rule::NoStore);
        assert_eq!(verdict.explained.cacheability(), Cacheability::No);
    }

    #[test]
    fn test_shared_between_threads() {
        let explainer = std::sync::Arc::new(Explainer::default());
        let handles = (0..4)
            .map(|_| {
                let explainer = explainer.clone();
                std::thread::spawn(move || explainer.explain(&get(200, &[])))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap().summary(), Summary::TypicallyNotCacheable);
        }
    }
}

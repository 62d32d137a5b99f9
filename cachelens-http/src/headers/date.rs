use chrono::{DateTime, NaiveDateTime, Utc};
use http::HeaderMap;
use http::header::{DATE, EXPIRES, LAST_MODIFIED};

use super::first;

/// obsolete RFC 850 format, e.g. `Sunday, 06-Nov-94 08:49:37 GMT`
const RFC850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
/// ANSI C `asctime()` format, e.g. `Sun Nov  6 08:49:37 1994`
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Parses an HTTP date in any of the three formats HTTP/1.1 recipients
/// must accept. Returns `None` for anything else, including `0`.
///
/// ```
/// use cachelens_http::headers::parse_http_date;
///
/// let imf = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT");
/// assert_eq!(imf, parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"));
/// assert_eq!(imf, parse_http_date("Sun Nov  6 08:49:37 1994"));
/// assert!(parse_http_date("0").is_none());
/// ```
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, RFC850_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(value, ASCTIME_FORMAT))
                .map(|date| date.and_utc())
                .ok()
        })
}

/// Response timestamps. Unparseable values are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub date: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let parse = |name| first(headers, name).and_then(parse_http_date);
        Self {
            date: parse(&DATE),
            expires: parse(&EXPIRES),
            last_modified: parse(&LAST_MODIFIED),
        }
    }

    /// Seconds between `Date` and `Expires`, when both are known.
    ///
    /// Negative when the response expired before it was generated.
    pub fn expires_in(&self) -> Option<i64> {
        self.date
            .zip(self.expires)
            .map(|(date, expires)| (expires - date).num_seconds())
    }
}

//! Query-string handling for forwarded requests.
//!
//! Only the first non-blank value of `q` survives; every other parameter the
//! caller sends is dropped. The value is decoded once (form-urlencoded rules)
//! and then appended to the upstream base without re-encoding.

use url::form_urlencoded;

/// The single query parameter carried through to the upstream.
pub const QUERY_PARAM: &str = "q";

/// First non-blank value of `q` in a raw query string.
///
/// Blank values (`?q=`) count as absent, matching the usual `parse_qs`
/// behaviour browsers' callers expect.
pub fn extract_query(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    form_urlencoded::parse(raw.as_bytes())
        .find(|(name, value)| name == QUERY_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// Build the upstream URL for a request.
///
/// `None` yields the bare base with no trailing `?`.
pub fn upstream_url(base: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{base}?{QUERY_PARAM}={q}"),
        None => base.to_string(),
    }
}

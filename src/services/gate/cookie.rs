//! Cookie header parsing.
//!
//! The edge delivers cookies as one concatenated `name=value; name2=value2`
//! header value. Only the first `cookie` entry is read.

use std::collections::HashMap;

use crate::edge::Headers;

/// Cookie carrying the signed session token.
pub const AUTH_COOKIE_NAME: &str = "mitlcdnauthjwt";

/// Parse a cookie header value into name → value.
///
/// Segments without `=` are skipped. Names and values are trimmed. On
/// duplicate names the last one wins.
pub fn parse_cookie_header(raw: &str) -> HashMap<&str, &str> {
    raw.split(';')
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect()
}

/// Value of cookie `name`, or `""` when there is no cookie header or no such cookie.
pub fn extract_cookie<'a>(headers: &'a Headers, name: &str) -> &'a str {
    let Some(raw) = headers
        .get("cookie")
        .and_then(|entries| entries.first())
        .map(|entry| entry.value.as_str())
    else {
        return "";
    };

    parse_cookie_header(raw).get(name).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::HeaderEntry;

    fn headers(cookie: Option<&str>) -> Headers {
        let mut h = Headers::new();
        h.insert(
            "host".to_string(),
            vec![HeaderEntry::new("Host", "d123.cf.net")],
        );
        if let Some(value) = cookie {
            h.insert(
                "cookie".to_string(),
                vec![HeaderEntry::new("Cookie", value)],
            );
        }
        h
    }

    #[test]
    fn test_extract_present() {
        let h = headers(Some("mitlcdnauthjwt=abc.def.ghi; AnotherOne=A; X-Name=B"));
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME), "abc.def.ghi");
    }

    #[test]
    fn test_extract_without_space_after_separator() {
        let h = headers(Some("mitlcdnauthjwt=tok;AnotherOne=A; X-Experiment-Name=B"));
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME), "tok");
        assert_eq!(extract_cookie(&h, "AnotherOne"), "A");
    }

    #[test]
    fn test_no_cookie_header() {
        assert_eq!(extract_cookie(&headers(None), AUTH_COOKIE_NAME), "");
    }

    #[test]
    fn test_only_irrelevant_cookies() {
        let h = headers(Some("AnotherOne=A; X-Experiment-Name=B"));
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME), "");
    }

    #[test]
    fn test_malformed_segment_is_skipped() {
        let h = headers(Some("garbage; mitlcdnauthjwt = tok ;;other"));
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME), "tok");
    }

    #[test]
    fn test_value_keeps_inner_equals() {
        let parsed = parse_cookie_header("a=b=c");
        assert_eq!(parsed.get("a"), Some(&"b=c"));
    }

    #[test]
    fn test_only_first_cookie_entry_is_read() {
        let mut h = headers(Some("other=1"));
        h.get_mut("cookie")
            .unwrap()
            .push(HeaderEntry::new("Cookie", "mitlcdnauthjwt=late"));
        assert_eq!(extract_cookie(&h, AUTH_COOKIE_NAME), "");
    }
}

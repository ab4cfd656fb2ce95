//! Query string parsing for incoming links
//!
//! Rules:
//! - no `?` means no parameters at all (`None`), which is distinct from a
//!   present but empty query (`Some` of an empty map)
//! - the URL is split on the first `?`, the query on `&`, and each part on
//!   its first `=`, so values may contain `=`
//! - a part without `=` maps to an empty value; empty parts are skipped
//! - a repeated key keeps its first position and takes the last value
//! - keys and values are percent-decoded; `+` is left alone
//!
//! Parsing never fails. A segment that cannot be decoded is kept as-is.

use percent_encoding::percent_decode_str;

use crate::models::QueryParams;

/// Parse the query string of `raw_url`
pub fn parse_query(raw_url: &str) -> Option<QueryParams> {
    let (_, query) = raw_url.split_once('?')?;

    let mut params = QueryParams::new();
    for part in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        // IndexMap::insert keeps the original slot for an existing key
        params.insert(decode_component(key), decode_component(value));
    }

    Some(params)
}

/// Percent-decode one key or value
///
/// Falls back to the raw text, whole and undecoded, when any `%` is not
/// followed by two hex digits or the escapes decode to invalid UTF-8.
pub fn decode_component(segment: &str) -> String {
    if has_malformed_escape(segment) {
        tracing::debug!(segment, "Malformed escape, query segment kept verbatim");
        return segment.to_string();
    }

    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            tracing::debug!(segment, "Undecodable query segment kept verbatim");
            segment.to_string()
        }
    }
}

fn has_malformed_escape(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &QueryParams) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_no_question_mark_is_none() {
        assert!(parse_query("myapp://home").is_none());
        assert!(parse_query("").is_none());
        assert!(parse_query("myapp://home#frag").is_none());
    }

    #[test]
    fn test_empty_query_is_some_empty() {
        let params = parse_query("myapp://home?").unwrap();
        assert!(params.is_empty());

        let params = parse_query("myapp://home?&&").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_simple_pairs_in_order() {
        let params = parse_query("base?a=1&b=2").unwrap();
        assert_eq!(pairs(&params), vec![("a", "1"), ("b", "2")]);

        let params = parse_query("base?b=2&a=1").unwrap();
        assert_eq!(pairs(&params), vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_duplicate_key_last_value_first_position() {
        let params = parse_query("base?x=1&y=5&x=2").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(pairs(&params), vec![("x", "2"), ("y", "5")]);
    }

    #[test]
    fn test_split_on_first_question_mark_only() {
        let params = parse_query("base?next=/path?inner=1").unwrap();
        assert_eq!(pairs(&params), vec![("next", "/path?inner=1")]);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = parse_query("base?token=abc==&q=a=b").unwrap();
        assert_eq!(pairs(&params), vec![("token", "abc=="), ("q", "a=b")]);
    }

    #[test]
    fn test_key_without_equals_gets_empty_value() {
        let params = parse_query("base?flag&a=1").unwrap();
        assert_eq!(pairs(&params), vec![("flag", ""), ("a", "1")]);
    }

    #[test]
    fn test_percent_decoding() {
        let params = parse_query("base?na%20me=hello%20world&city=%E5%8C%97%E4%BA%AC").unwrap();
        assert_eq!(
            pairs(&params),
            vec![("na me", "hello world"), ("city", "北京")]
        );
    }

    #[test]
    fn test_plus_is_not_a_space() {
        let params = parse_query("base?q=a+b").unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("a+b"));
    }

    #[test]
    fn test_malformed_escape_passes_through() {
        let params = parse_query("base?a=100%&b=%zz&c=ok%21").unwrap();
        assert_eq!(pairs(&params), vec![("a", "100%"), ("b", "%zz"), ("c", "ok!")]);
    }

    #[test]
    fn test_mixed_valid_and_malformed_escapes_stay_raw() {
        let params = parse_query("base?v=%41%zz&k%20%=x&ok=%41%42").unwrap();
        assert_eq!(
            pairs(&params),
            vec![("v", "%41%zz"), ("k%20%", "x"), ("ok", "AB")]
        );
    }

    #[test]
    fn test_decode_component_checks_every_escape() {
        assert_eq!(decode_component("%2"), "%2");
        assert_eq!(decode_component("a%20b%"), "a%20b%");
        assert_eq!(decode_component("%25%20"), "% ");
    }

    #[test]
    fn test_invalid_utf8_escape_passes_through() {
        let params = parse_query("base?a=%E0%A4&b=%FF").unwrap();
        assert_eq!(pairs(&params), vec![("a", "%E0%A4"), ("b", "%FF")]);
    }

    #[test]
    fn test_fragment_is_part_of_query_text() {
        let params = parse_query("base?a=1#top").unwrap();
        assert_eq!(params.get("a").map(String::as_str), Some("1#top"));
    }
}

//! Session cookie lookup.
//!
//! Only `name=value` pairs are recognised; cookie attributes are ignored.

/// Extract a cookie value from a raw `Cookie` header.
///
/// Pairs are separated by `;`; surrounding whitespace is trimmed and names
/// must match exactly.
pub fn extract_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|cookie| {
        let (key, value) = cookie.trim().split_once('=')?;

        if key.trim_end() == name {
            Some(value.trim_start())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cookie() {
        let header = "foo=bar; session=abc123; other=xyz";

        assert_eq!(extract_cookie(header, "session"), Some("abc123"));
        assert_eq!(extract_cookie(header, "foo"), Some("bar"));
        assert_eq!(extract_cookie(header, "missing"), None);
    }

    #[test]
    fn test_extract_single_cookie() {
        assert_eq!(extract_cookie("session=a.b.c", "session"), Some("a.b.c"));
    }

    #[test]
    fn test_name_must_match_exactly() {
        let header = "my_session=nope; session_id=nope";
        assert_eq!(extract_cookie(header, "session"), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(extract_cookie("session=a=b", "session"), Some("a=b"));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let header = "garbage; ; session=token";
        assert_eq!(extract_cookie(header, "session"), Some("token"));
        assert_eq!(extract_cookie("", "session"), None);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(extract_cookie("session=", "session"), Some(""));
    }
}

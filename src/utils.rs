//! Utility helpers for DashShare

/// Percent-encode a string the way browsers' `encodeURIComponent` does:
/// everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )` is escaped.
pub fn encode_uri_component<S: AsRef<str>>(s: S) -> String {
    urlencoding::encode(s.as_ref())
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Scheme, host and port of an absolute URL, without a trailing slash.
/// Returns `None` for relative or malformed input.
pub fn origin_of(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let (scheme, rest) = trimmed.split_once("://")?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
        return None;
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() {
        return None;
    }
    Some(format!("{}://{}", scheme.to_ascii_lowercase(), authority))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("Check this out"), "Check%20this%20out");
        assert_eq!(
            encode_uri_component("See: http://x/d/1"),
            "See%3A%20http%3A%2F%2Fx%2Fd%2F1"
        );
        assert_eq!(encode_uri_component("it's (fine)!*~"), "it's%20(fine)!*~");
        assert_eq!(encode_uri_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn origin_strips_path_query_and_fragment() {
        assert_eq!(
            origin_of("https://bi.example.com:8088/superset/dashboard/3/?x=1").as_deref(),
            Some("https://bi.example.com:8088")
        );
        assert_eq!(origin_of("http://host#frag").as_deref(), Some("http://host"));
        assert_eq!(origin_of("HTTP://Host/").as_deref(), Some("http://Host"));
    }

    #[test]
    fn origin_rejects_relative_urls() {
        assert_eq!(origin_of("/dashboard/3"), None);
        assert_eq!(origin_of("http://"), None);
        assert_eq!(origin_of("://host"), None);
    }
}

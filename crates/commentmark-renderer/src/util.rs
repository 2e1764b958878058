//! Shared utility functions for markdown rendering.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use pulldown_cmark::HeadingLevel;

/// Characters percent-encoded in link destinations.
///
/// Everything outside this set (ASCII letters, digits and URL punctuation)
/// is kept as-is; non-ASCII bytes are always encoded.
const HREF_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escape a link destination for output.
///
/// Unsafe characters are percent-encoded, `&` and `'` become HTML entities.
///
/// # Examples
///
/// ```
/// use commentmark_renderer::escape_href;
///
/// assert_eq!(escape_href("http://x.test/a b"), "http://x.test/a%20b");
/// assert_eq!(escape_href("/q?a=1&b=2"), "/q?a=1&amp;b=2");
/// ```
#[must_use]
pub fn escape_href(href: &str) -> String {
    let encoded = utf8_percent_encode(href, HREF_ENCODE).to_string();
    let mut result = String::with_capacity(encoded.len());
    for c in encoded.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_href_keeps_url_punctuation() {
        assert_eq!(
            escape_href("https://example.com/path-1_2.html?x=y#frag"),
            "https://example.com/path-1_2.html?x=y#frag"
        );
        assert_eq!(escape_href("mailto:me@x.test"), "mailto:me@x.test");
        assert_eq!(escape_href("/a/(b)/~c;d,e+f$g!h*i"), "/a/(b)/~c;d,e+f$g!h*i");
    }

    #[test]
    fn test_escape_href_encodes_unsafe() {
        assert_eq!(escape_href("a b"), "a%20b");
        assert_eq!(escape_href("<x>"), "%3Cx%3E");
        assert_eq!(escape_href("caf\u{e9}"), "caf%C3%A9");
        assert_eq!(escape_href("a|b"), "a%7Cb");
    }

    #[test]
    fn test_escape_href_entities() {
        assert_eq!(escape_href("?a=1&b=2"), "?a=1&amp;b=2");
        assert_eq!(escape_href("it's"), "it&#x27;s");
    }

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}

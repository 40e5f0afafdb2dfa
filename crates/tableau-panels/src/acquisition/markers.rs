//! Marker-delimited text extraction.
//!
//! Tableau embeds the values we need in HTML and in length-prefixed JSON
//! frames. Both are read as a tiny grammar: a prefix literal, a payload,
//! and a suffix literal. Format drift should only ever require changing
//! the literals passed in here.

/// A located payload: the text between two literals plus where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    /// Byte offset of `text` in the haystack.
    pub start: usize,
    /// Byte offset one past the end of `text`.
    pub end: usize,
}

/// Find the first `prefix`, then the first `suffix` after it, and return
/// the text strictly between them.
pub fn between<'a>(haystack: &'a str, prefix: &str, suffix: &str) -> Option<Span<'a>> {
    let start = haystack.find(prefix)? + prefix.len();
    let end = start + haystack[start..].find(suffix)?;
    Some(Span {
        text: &haystack[start..end],
        start,
        end,
    })
}

/// Find the first occurrence of `marker` immediately followed by one of
/// `separators`. Returns the offset just past the separator.
pub fn after_marker(haystack: &str, marker: &str, separators: &[&str]) -> Option<usize> {
    haystack.match_indices(marker).find_map(|(idx, _)| {
        let rest = &haystack[idx + marker.len()..];
        separators
            .iter()
            .find(|sep| rest.starts_with(**sep))
            .map(|sep| idx + marker.len() + sep.len())
    })
}

/// Undo the two HTML entity encodings Tableau applies to inline config:
/// `&quot;` is dropped and `&#x3a;` becomes `:`.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&quot;", "").replace("&#x3a;", ":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_basic() {
        let span = between("a[hello]b", "[", "]").unwrap();
        assert_eq!(span.text, "hello");
        assert_eq!(span.start, 2);
        assert_eq!(span.end, 7);
    }

    #[test]
    fn test_between_suffix_must_follow_prefix() {
        assert!(between("]x[", "[", "]").is_none());
    }

    #[test]
    fn test_between_missing_literals() {
        assert!(between("abc", "[", "]").is_none());
        assert!(between("a[bc", "[", "]").is_none());
    }

    #[test]
    fn test_after_marker_skips_unseparated_occurrences() {
        let text = "sessionid is here; sessionid=:value";
        let idx = after_marker(text, "sessionid", &["=:"]).unwrap();
        assert_eq!(&text[idx..], "value");
    }

    #[test]
    fn test_after_marker_picks_first_matching_separator() {
        let text = "key&quot;&#x3a;&quot;v";
        let idx = after_marker(text, "key", &["&quot;:&quot;", "&quot;&#x3a;&quot;"]).unwrap();
        assert_eq!(&text[idx..], "v");
    }

    #[test]
    fn test_unescape_entities() {
        assert_eq!(unescape_entities("&quot;A&#x3a;0&quot;,"), "A:0,");
        assert_eq!(unescape_entities("plain"), "plain");
    }
}

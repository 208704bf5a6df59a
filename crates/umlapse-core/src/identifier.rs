//! Element identifier helpers.
//!
//! Identifiers in a revision tree are plain strings that stay stable across
//! revisions for the same logical element. Some of them carry a reference
//! marker (`/`) that has to be removed before two identifiers are compared
//! against user supplied values such as a diagram scope.

use std::borrow::Cow;

/// Character used by model documents to mark an identifier as a reference.
pub const REFERENCE_MARKER: char = '/';

/// Returns `id` with every reference marker removed.
///
/// Borrows when there is nothing to strip.
///
/// # Examples
///
/// ```
/// use umlapse_core::identifier::strip_reference_marker;
///
/// assert_eq!(strip_reference_marker("/AAAAAAFF+qBWK6M3Z8Y="), "AAAAAAFF+qBWK6M3Z8Y=");
/// assert_eq!(strip_reference_marker("plain"), "plain");
/// ```
pub fn strip_reference_marker(id: &str) -> Cow<'_, str> {
    if id.contains(REFERENCE_MARKER) {
        Cow::Owned(id.replace(REFERENCE_MARKER, ""))
    } else {
        Cow::Borrowed(id)
    }
}

/// Escapes an identifier or plain label so it can sit inside a double-quoted
/// graph-description string.
pub fn escape_quoted(value: &str) -> Cow<'_, str> {
    if value.contains(['\\', '"']) {
        Cow::Owned(value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Escapes text placed inside an HTML-like graph label.
pub fn escape_html(value: &str) -> Cow<'_, str> {
    if value.contains(['&', '<', '>', '"']) {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                _ => escaped.push(ch),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_reference_marker() {
        assert_eq!(strip_reference_marker("/diagram"), "diagram");
        assert_eq!(strip_reference_marker("a/b/c"), "abc");
        assert_eq!(strip_reference_marker(""), "");
    }

    #[test]
    fn test_strip_borrows_without_marker() {
        assert!(matches!(strip_reference_marker("diagram"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("plain"), "plain");
        assert_eq!(escape_quoted(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_quoted(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("List<int>"), "List&lt;int&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("+run(): void"), "+run(): void");
    }
}

//! Free-text input sanitizer.
//!
//! Defense in depth for form fields, not a substitute for output encoding:
//! callers must still encode on render. Input matching the denylist is
//! rejected outright (empty string); everything else is trimmed, truncated,
//! and HTML-escaped.

use regex::Regex;

/// Denylist patterns checked against the raw (pre-escape) input.
///
/// The first group mirrors classic XSS vectors, the second group the
/// SQL-injection probes seen in form fields. Matching is case-insensitive.
const DENYLIST: [(&str, &str); 12] = [
    ("script_tag", r"(?i)<script\b"),
    ("embedded_tag", r"(?i)<(iframe|object|embed|applet)\b"),
    ("javascript_uri", r"(?i)javascript:"),
    ("data_uri", r"(?i)data:"),
    ("vbscript_uri", r"(?i)vbscript:"),
    ("event_handler", r"(?i)\bon\w+\s*="),
    ("eval_call", r"(?i)\beval\s*\("),
    ("popup_call", r"(?i)\b(alert|prompt|confirm)\s*\("),
    ("css_expression", r"(?i)expression\s*\("),
    ("sql_keywords", r"(?i)\b(union\s+select|drop\s+table|delete\s+from|insert\s+into|update\s+set)\b"),
    ("sql_tautology", r"(?i)\b(or|and)\s+1\s*=\s*1\b"),
    ("sql_separator", r"(;|--|/\*|\*/)"),
];

/// Free-text sanitizer with a compiled denylist.
pub struct Sanitizer {
    patterns: Vec<(&'static str, Regex)>,
}

impl Sanitizer {
    pub const DEFAULT_MAX_LENGTH: usize = 255;

    /// Compile the denylist.
    ///
    /// # Errors
    /// * `regex::Error` - a denylist pattern failed to compile
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = DENYLIST
            .iter()
            .map(|(name, pattern)| Regex::new(pattern).map(|regex| (*name, regex)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Sanitize with the default 255-character limit.
    pub fn sanitize(&self, input: &str) -> String {
        self.sanitize_with_limit(input, Self::DEFAULT_MAX_LENGTH)
    }

    /// Trim, truncate, reject denylisted input, and HTML-escape the rest.
    ///
    /// Rejection returns an empty string and logs the matched pattern; no
    /// other side effects.
    pub fn sanitize_with_limit(&self, input: &str, max_length: usize) -> String {
        let trimmed: String = input.trim().chars().take(max_length).collect();

        for (name, regex) in &self.patterns {
            if regex.is_match(&trimmed) {
                tracing::warn!(pattern = name, "Input rejected by sanitizer");
                return String::new();
            }
        }

        html_escape(&trimmed)
    }
}

/// Escape the characters that break out of HTML text and attribute contexts.
fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> Sanitizer {
        Sanitizer::new().unwrap()
    }

    #[test]
    fn script_tag_is_rejected() {
        assert_eq!(sanitizer().sanitize("<script>alert(1)</script>"), "");
        assert_eq!(sanitizer().sanitize("<SCRIPT src=x>"), "");
    }

    #[test]
    fn uri_schemes_and_handlers_are_rejected() {
        let sanitizer = sanitizer();
        assert_eq!(sanitizer.sanitize("javascript:void(0)"), "");
        assert_eq!(sanitizer.sanitize("DATA:text/html;base64,xx"), "");
        assert_eq!(sanitizer.sanitize("vbscript:msgbox"), "");
        assert_eq!(sanitizer.sanitize("x onerror=steal()"), "");
        assert_eq!(sanitizer.sanitize("eval (code)"), "");
    }

    #[test]
    fn sql_probes_are_rejected() {
        let sanitizer = sanitizer();
        assert_eq!(sanitizer.sanitize("' OR 1=1 --"), "");
        assert_eq!(sanitizer.sanitize("1; DROP TABLE users"), "");
        assert_eq!(sanitizer.sanitize("union select password"), "");
    }

    #[test]
    fn ordinary_text_is_escaped_not_rejected() {
        let clean = sanitizer().sanitize("O'Brien");
        assert_eq!(clean, "O&#x27;Brien");

        assert_eq!(sanitizer().sanitize("  Ivan Petrov  "), "Ivan Petrov");
        assert_eq!(
            sanitizer().sanitize(r#"a<b & "c""#),
            "a&lt;b &amp; &quot;c&quot;"
        );
    }

    #[test]
    fn truncation_happens_on_char_boundaries() {
        let sanitizer = sanitizer();
        assert_eq!(sanitizer.sanitize_with_limit("abcdef", 3), "abc");
        // Multi-byte characters must not be split.
        assert_eq!(sanitizer.sanitize_with_limit("ααααα", 2), "αα");
    }

    #[test]
    fn default_limit_is_255_chars() {
        let long = "a".repeat(300);
        assert_eq!(sanitizer().sanitize(&long).chars().count(), 255);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitizer().sanitize(""), "");
        assert_eq!(sanitizer().sanitize("   "), "");
    }
}

//! # Text Helpers
//!
//! Label cleanup applied before crumbs reach a renderer.

use regex::Regex;
use std::sync::LazyLock;

/// Remove markup from a title.
///
/// `<script>` and `<style>` elements are dropped with their content, every
/// other tag is removed, whitespace runs collapse to a single space and the
/// result is trimmed.
#[must_use]
pub fn strip_tags(input: &str) -> String {
    static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<script[^>]*?>.*?</script>").expect("valid regex")
    });
    static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?is)<style[^>]*?>.*?</style>").expect("valid regex")
    });
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
    static SPACE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));

    let text = SCRIPT_RE.replace_all(input, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = TAG_RE.replace_all(&text, "");
    let text = SPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Escape text for inclusion in HTML.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

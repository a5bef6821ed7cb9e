//! Markdown code fence removal.

/// Strip one leading and one trailing fenced-code marker, if present.
///
/// The leading marker may carry a language tag (```` ```json ````). Only the
/// outermost fence is removed; the text inside is left as is apart from
/// surrounding whitespace.
///
/// # Examples
///
/// ```
/// use stepforge_core::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
/// assert_eq!(strip_code_fence("[1, 2]"), "[1, 2]");
/// assert_eq!(strip_code_fence("```\n[]"), "[]");
/// ```
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '_')
            .unwrap_or(rest.len());
        body = rest[tag_len..].trim_start();
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest.trim_end();
    }

    body
}

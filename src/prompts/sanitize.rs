//! Markdown fence stripping for model output.
//!
//! Models wrap output in ```html ... ``` despite being told not to.
//! Handles: ```html\n...\n```, ```\n...\n```, unterminated fences, and bare text.

const FENCE: &str = "```";

/// Strip a leading code fence (with optional language tag) and its closing
/// fence, then trim. Repeats until the text no longer opens with a fence, so
/// `sanitize(sanitize(x)) == sanitize(x)` for any input.
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim();

    while let Some(rest) = current.strip_prefix(FENCE) {
        let rest = skip_language_tag(rest).trim();
        let rest = rest.strip_suffix(FENCE).unwrap_or(rest);
        current = rest.trim();
    }

    current.to_string()
}

/// True when the text opens with the `<!doctype html` prefix, any case.
pub fn is_html_document(text: &str) -> bool {
    const DOCTYPE: &str = "<!doctype html";
    let trimmed = text.trim_start();
    trimmed
        .get(..DOCTYPE.len())
        .map(|head| head.eq_ignore_ascii_case(DOCTYPE))
        .unwrap_or(false)
}

/// Drop an info string like `html` or `c++` after the opening fence.
///
/// A tag is the whole first line when that line is a single word. An `html`
/// tag glued to the content (```` ```html<!DOCTYPE ````) is also dropped.
fn skip_language_tag(s: &str) -> &str {
    let line_end = s.find('\n').unwrap_or(s.len());
    let first_line = s[..line_end].trim();
    let is_tag = first_line
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'));
    if is_tag {
        return &s[line_end..];
    }
    match s.get(..4) {
        Some(head) if head.eq_ignore_ascii_case("html") => &s[4..],
        _ => s,
    }
}

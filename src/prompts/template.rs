//! Placeholder substitution for prompt templates.
//!
//! Tokens are `{UPPER_SNAKE}` names. Rendering is a single left-to-right
//! scan: a substituted value is copied out and never rescanned, so a value
//! that happens to contain `{USER_NAME}` stays literal and the order of the
//! value map does not matter.

use std::collections::HashMap;

/// A static prompt with named placeholders.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub text: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    /// Substitute every occurrence of every known token.
    ///
    /// Tokens with no entry in `values` are left as-is.
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        render(self.text, values)
    }

    /// Placeholder names appearing in the template, in first-seen order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.text;
        while let Some((before_len, name)) = next_token(rest) {
            if !names.contains(&name) {
                names.push(name);
            }
            rest = &rest[before_len + name.len() + 2..];
        }
        names
    }
}

/// Single-pass render of `text` against `values`.
pub fn render(text: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        match token_at(candidate) {
            Some(name) => {
                let token_len = name.len() + 2;
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&candidate[..token_len]),
                }
                rest = &candidate[token_len..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// If `s` starts with `{NAME}`, return `NAME`.
fn token_at(s: &str) -> Option<&str> {
    let body = s.strip_prefix('{')?;
    let close = body.find('}')?;
    let name = &body[..close];
    if is_token_name(name) {
        Some(name)
    } else {
        None
    }
}

/// Find the next token: (byte offset of `{`, name).
fn next_token(s: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    while let Some(open) = s[offset..].find('{') {
        let at = offset + open;
        if let Some(name) = token_at(&s[at..]) {
            return Some((at, name));
        }
        offset = at + 1;
    }
    None
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name.starts_with(|c: char| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = render(
            "<title>{BUSINESS_NAME}</title><h1>{BUSINESS_NAME}</h1>",
            &values(&[("BUSINESS_NAME", "Ana's Bakery")]),
        );
        assert_eq!(out, "<title>Ana's Bakery</title><h1>Ana's Bakery</h1>");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = render(
            "{USER_INPUT} by {USER_NAME}",
            &values(&[("USER_INPUT", "call me {USER_NAME}"), ("USER_NAME", "Ana")]),
        );
        assert_eq!(out, "call me {USER_NAME} by Ana");
    }

    #[test]
    fn prefix_names_do_not_collide() {
        let out = render(
            "{USER} / {USER_NAME}",
            &values(&[("USER", "u"), ("USER_NAME", "Ana")]),
        );
        assert_eq!(out, "u / Ana");
    }

    #[test]
    fn unknown_tokens_stay_verbatim() {
        let out = render("Hello {UNKNOWN} {NAME}", &values(&[("NAME", "x")]));
        assert_eq!(out, "Hello {UNKNOWN} x");
    }

    #[test]
    fn empty_value_removes_token() {
        let out = render("a{MODIFICATION_SECTION}b", &values(&[("MODIFICATION_SECTION", "")]));
        assert_eq!(out, "ab");
    }

    #[test]
    fn non_token_braces_pass_through() {
        let out = render(
            "fn main() { {X} } {lower} {",
            &values(&[("X", "1")]),
        );
        assert_eq!(out, "fn main() { 1 } {lower} {");
    }

    #[test]
    fn unicode_values_and_text() {
        let out = render("నమస్తే {NAME}!", &values(&[("NAME", "हिन्दी")]));
        assert_eq!(out, "నమస్తే हिन्दी!");
    }

    #[test]
    fn placeholders_in_first_seen_order() {
        let t = PromptTemplate::new("t", "{B} {A} {B} {not_one} {C_2}");
        assert_eq!(t.placeholders(), vec!["B", "A", "C_2"]);
    }
}

//! Single-line editable field with a cursor.
//!
//! Stores a `String` and a character-offset cursor. Wide characters (Telugu,
//! Hindi, emoji) are measured with `unicode-width` so the visible window and
//! the terminal cursor line up.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Default, Clone)]
pub struct InputLine {
    content: String,
    /// Character offset (0 = before first char).
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace content and move the cursor to the end. No-op when unchanged
    /// so external syncs don't disturb an edit in progress.
    pub fn set_content(&mut self, text: &str) {
        if self.content == text {
            return;
        }
        self.content = text.to_string();
        self.cursor = self.content.chars().count();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Bare `\r` is dropped; only Enter submits.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' || ch == '\n' {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Pasted text is flattened to one line.
    pub fn insert_str(&mut self, s: &str) {
        let flat: String = s
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, &flat);
        self.cursor += flat.chars().count();
    }

    pub fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.remove_at_cursor();
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.len() {
            self.remove_at_cursor();
        }
    }

    pub fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let (start, end) = (self.byte_offset(pos), self.byte_offset(self.cursor));
        self.content.replace_range(start..end, "");
        self.cursor = pos;
    }

    pub fn paste_clipboard(&mut self) {
        if let Ok(mut clip) = arboard::Clipboard::new() {
            if let Ok(text) = clip.get_text() {
                self.insert_str(&text);
            }
        }
    }

    /// Editing keys. Returns `true` when the key changed or moved something.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('v') if ctrl => self.paste_clipboard(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Backspace if ctrl => self.delete_word_back(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }

    /// The slice that fits in `width` columns with the cursor visible, and
    /// the cursor's column within it.
    pub fn window(&self, width: u16) -> (String, u16) {
        let width = usize::from(width.max(1));
        let chars: Vec<char> = self.content.chars().collect();
        let col = |c: &char| c.width().unwrap_or(0);

        // Scroll left edge until the cursor (plus one cell for it) fits.
        let mut start = 0;
        let mut cursor_col: usize = chars[..self.cursor].iter().map(col).sum();
        while cursor_col + 1 > width && start < self.cursor {
            cursor_col -= col(&chars[start]);
            start += 1;
        }

        let mut used = 0;
        let visible: String = chars[start..]
            .iter()
            .take_while(|c| {
                used += col(*c);
                used <= width
            })
            .collect();
        (visible, cursor_col as u16)
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn remove_at_cursor(&mut self) {
        let at = self.byte_offset(self.cursor);
        if let Some(ch) = self.content[at..].chars().next() {
            self.content.replace_range(at..at + ch.len_utf8(), "");
        }
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let mut il = InputLine::new();
        for c in "Ana".chars() {
            il.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(il.content(), "Ana");
        il.handle_key(key(KeyCode::Backspace));
        assert_eq!(il.content(), "An");
        assert_eq!(il.cursor(), 2);
    }

    #[test]
    fn insert_in_middle() {
        let mut il = InputLine::new();
        il.set_content("Aa's");
        il.handle_key(key(KeyCode::Home));
        il.handle_key(key(KeyCode::Right));
        il.insert_char('n');
        assert_eq!(il.content(), "Ana's");
    }

    #[test]
    fn set_content_same_text_keeps_cursor() {
        let mut il = InputLine::new();
        il.set_content("hello");
        il.handle_key(key(KeyCode::Home));
        il.set_content("hello");
        assert_eq!(il.cursor(), 0);
        il.set_content("bye");
        assert_eq!(il.cursor(), 3);
    }

    #[test]
    fn paste_is_flattened() {
        let mut il = InputLine::new();
        il.insert_str("one\r\ntwo");
        assert!(!il.content().contains('\n'));
        assert!(il.content().starts_with("one"));
        assert!(il.content().ends_with("two"));
    }

    #[test]
    fn ctrl_chars_are_not_inserted() {
        let mut il = InputLine::new();
        let consumed = il.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert!(!consumed);
        assert_eq!(il.content(), "");
    }

    #[test]
    fn delete_word_back() {
        let mut il = InputLine::new();
        il.set_content("make it bolder");
        il.delete_word_back();
        assert_eq!(il.content(), "make it ");
        il.delete_word_back();
        assert_eq!(il.content(), "make ");
    }

    #[test]
    fn unicode_editing() {
        let mut il = InputLine::new();
        il.set_content("నమస్తే");
        let n = il.content().chars().count();
        il.delete_back();
        assert_eq!(il.content().chars().count(), n - 1);
        il.handle_key(key(KeyCode::Delete));
        assert_eq!(il.content().chars().count(), n - 1);
    }

    #[test]
    fn window_fits_short_text() {
        let mut il = InputLine::new();
        il.set_content("cakes");
        assert_eq!(il.window(20), ("cakes".to_string(), 5));
    }

    #[test]
    fn window_scrolls_to_cursor() {
        let mut il = InputLine::new();
        il.set_content("abcdefghij");
        let (text, col) = il.window(5);
        assert_eq!(text, "ghij");
        assert_eq!(col, 4);

        il.handle_key(key(KeyCode::Home));
        let (text, col) = il.window(5);
        assert_eq!(text, "abcde");
        assert_eq!(col, 0);
    }

    #[test]
    fn window_counts_wide_chars() {
        let mut il = InputLine::new();
        il.set_content("☕☕☕");
        let (_, col) = il.window(40);
        assert_eq!(col, 6);
    }
}

use horologe_engine::input::Key;
use horologe_engine::text::{FontId, FontSystem};

use crate::event::UiEvent;

/// Decides what part of an insertion is accepted.
///
/// Called with the text after any selection was removed, the byte offset of
/// the insertion, and the proposed text. Returns the text to insert.
pub type InsertFilter = fn(text: &str, at: usize, insert: &str) -> String;

/// Single-line text-editing state (cursor, selection anchor, optional filter).
///
/// Every byte offset it hands out sits on a UTF-8 character boundary.
#[derive(Debug, Clone)]
pub struct TextEditState {
    text: String,
    /// Byte offset of the caret.
    pub cursor: usize,
    /// Byte offset of the selection anchor. `cursor == anchor` means no selection.
    pub anchor: usize,
    filter: Option<InsertFilter>,
}

impl TextEditState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, cursor: end, anchor: end, filter: None }
    }

    pub fn with_filter(mut self, filter: InsertFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the whole text and puts the caret at the end. Bypasses the filter.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.anchor = self.cursor;
    }

    /// Sorted byte range of the selection.
    #[inline]
    pub fn sel_range(&self) -> (usize, usize) {
        (self.cursor.min(self.anchor), self.cursor.max(self.anchor))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    // ── cursor movement ───────────────────────────────────────────────────

    /// One character left; collapses a selection to its left edge unless `shift`.
    pub fn move_left(&mut self, shift: bool) {
        if !shift && self.has_selection() {
            let left = self.sel_range().0;
            self.cursor = left;
            self.anchor = left;
        } else {
            self.cursor = prev_char(&self.text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    pub fn move_right(&mut self, shift: bool) {
        if !shift && self.has_selection() {
            let right = self.sel_range().1;
            self.cursor = right;
            self.anchor = right;
        } else {
            self.cursor = next_char(&self.text, self.cursor);
            if !shift { self.anchor = self.cursor; }
        }
    }

    pub fn move_home(&mut self, shift: bool) {
        self.cursor = 0;
        if !shift { self.anchor = self.cursor; }
    }

    pub fn move_end(&mut self, shift: bool) {
        self.cursor = self.text.len();
        if !shift { self.anchor = self.cursor; }
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.cursor = self.text.len();
    }

    // ── editing ───────────────────────────────────────────────────────────

    /// Insert `s` at the caret, replacing the selection. Returns `true` if the
    /// text changed.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let deleted = self.delete_selection();
        let accepted = match self.filter {
            Some(filter) => filter(&self.text, self.cursor, s),
            None => s.to_string(),
        };
        self.text.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
        self.anchor = self.cursor;
        deleted || !accepted.is_empty()
    }

    /// Backspace. Returns `true` if the text changed.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() { return true; }
        if self.cursor == 0 { return false; }
        let prev = prev_char(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        self.anchor = prev;
        true
    }

    /// Delete key. Returns `true` if the text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() { return true; }
        if self.cursor >= self.text.len() { return false; }
        let next = next_char(&self.text, self.cursor);
        self.text.drain(self.cursor..next);
        true
    }

    // ── clipboard ─────────────────────────────────────────────────────────

    pub fn copy(&self) {
        let (lo, hi) = self.sel_range();
        if lo == hi { return; }
        match arboard::Clipboard::new() {
            Ok(mut cb) => {
                if let Err(e) = cb.set_text(self.text[lo..hi].to_string()) {
                    log::warn!("clipboard write failed: {e}");
                }
            }
            Err(e) => log::warn!("clipboard unavailable: {e}"),
        }
    }

    pub fn cut(&mut self) -> bool {
        if !self.has_selection() { return false; }
        self.copy();
        self.delete_selection()
    }

    pub fn paste(&mut self) -> bool {
        let text = match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("clipboard read failed: {e}");
                return false;
            }
        };
        // Single-line field: keep the first line only.
        let line = text.lines().next().unwrap_or_default();
        self.insert_str(line)
    }

    // ── event handling ────────────────────────────────────────────────────

    /// Handle keyboard editing events.
    ///
    /// Returns `(consumed, text_changed)`. Enter and Escape are left to the
    /// owning widget.
    pub fn on_event(&mut self, event: &UiEvent) -> (bool, bool) {
        match event {
            UiEvent::TextInput { text } => (true, self.insert_str(text)),

            UiEvent::KeyPress { key, modifiers } => {
                let shift = modifiers.shift;
                let cmd = modifiers.command();

                match key {
                    Key::Backspace => (true, self.delete_backward()),
                    Key::Delete => (true, self.delete_forward()),
                    Key::ArrowLeft => {
                        self.move_left(shift);
                        (true, false)
                    }
                    Key::ArrowRight => {
                        self.move_right(shift);
                        (true, false)
                    }
                    Key::Home => {
                        self.move_home(shift);
                        (true, false)
                    }
                    Key::End => {
                        self.move_end(shift);
                        (true, false)
                    }
                    Key::A if cmd => {
                        self.select_all();
                        (true, false)
                    }
                    Key::C if cmd => {
                        self.copy();
                        (true, false)
                    }
                    Key::X if cmd => (true, self.cut()),
                    Key::V if cmd => (true, self.paste()),
                    _ => (false, false),
                }
            }

            _ => (false, false),
        }
    }

    // ── measurement helpers ───────────────────────────────────────────────

    /// X of the caret relative to the text origin.
    pub fn cursor_x(&self, font: FontId, size: f32, fs: &FontSystem, scale: f32) -> f32 {
        prefix_width(fs, &self.text[..self.cursor], font, size, scale)
    }

    /// X of the selection anchor relative to the text origin.
    pub fn anchor_x(&self, font: FontId, size: f32, fs: &FontSystem, scale: f32) -> f32 {
        prefix_width(fs, &self.text[..self.anchor], font, size, scale)
    }

    /// Closest caret offset to `x` (relative to the text origin).
    pub fn x_to_cursor(&self, x: f32, font: FontId, size: f32, fs: &FontSystem, scale: f32) -> usize {
        let text = &self.text;
        let mut best_pos = 0;
        let mut best_dist = f32::INFINITY;
        let mut i = 0;
        loop {
            let dist = (prefix_width(fs, &text[..i], font, size, scale) - x).abs();
            if dist < best_dist {
                best_dist = dist;
                best_pos = i;
            }
            if i >= text.len() { break; }
            i = next_char(text, i);
        }
        best_pos
    }

    /// Delete the selection; returns `true` if anything was deleted.
    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() { return false; }
        let (lo, hi) = self.sel_range();
        self.text.drain(lo..hi);
        self.cursor = lo;
        self.anchor = lo;
        true
    }
}

#[inline]
fn prefix_width(fs: &FontSystem, text: &str, font: FontId, size: f32, scale: f32) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    fs.measure_text_scaled(text, font, size, None, scale).x
}

// ── UTF-8 helpers ─────────────────────────────────────────────────────────

fn prev_char(s: &str, from: usize) -> usize {
    if from == 0 { return 0; }
    let mut i = from - 1;
    while !s.is_char_boundary(i) { i -= 1; }
    i
}

fn next_char(s: &str, from: usize) -> usize {
    if from >= s.len() { return s.len(); }
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) { i += 1; }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use horologe_engine::input::Modifiers;

    fn key(k: Key) -> UiEvent {
        UiEvent::KeyPress { key: k, modifiers: Modifiers::default() }
    }

    fn digits_only(_text: &str, _at: usize, insert: &str) -> String {
        insert.chars().filter(char::is_ascii_digit).collect()
    }

    #[test]
    fn typing_appends_at_caret() {
        let mut st = TextEditState::new("12");
        assert_eq!(st.on_event(&UiEvent::TextInput { text: "3".into() }), (true, true));
        assert_eq!(st.text(), "123");
        st.move_home(false);
        st.insert_str("0");
        assert_eq!(st.text(), "0123");
        assert_eq!(st.cursor, 1);
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut st = TextEditState::new("aé");
        assert!(st.delete_backward());
        assert_eq!(st.text(), "a");
        st.move_home(false);
        assert!(st.delete_forward());
        assert_eq!(st.text(), "");
        assert!(!st.delete_backward());
    }

    #[test]
    fn selection_is_replaced_on_insert() {
        let mut st = TextEditState::new("hello");
        st.select_all();
        st.insert_str("x");
        assert_eq!(st.text(), "x");
        assert!(!st.has_selection());
    }

    #[test]
    fn shift_arrows_extend_selection() {
        let mut st = TextEditState::new("abc");
        st.move_left(true);
        st.move_left(true);
        assert_eq!(st.sel_range(), (1, 3));
        st.move_left(false);
        assert_eq!((st.cursor, st.anchor), (1, 1));
    }

    #[test]
    fn filter_drops_rejected_input() {
        let mut st = TextEditState::new("4").with_filter(digits_only);
        assert!(!st.insert_str("ab"));
        assert!(st.insert_str("a2b"));
        assert_eq!(st.text(), "42");
    }

    #[test]
    fn set_text_moves_caret_to_end() {
        let mut st = TextEditState::new("");
        st.set_text("15");
        assert_eq!((st.cursor, st.anchor), (2, 2));
    }

    #[test]
    fn navigation_keys_are_consumed_without_change() {
        let mut st = TextEditState::new("abc");
        assert_eq!(st.on_event(&key(Key::Home)), (true, false));
        assert_eq!(st.cursor, 0);
        assert_eq!(st.on_event(&key(Key::End)), (true, false));
        assert_eq!(st.on_event(&key(Key::Enter)), (false, false));
    }

    #[test]
    fn caret_position_without_fonts_is_zero() {
        let fs = FontSystem::new();
        let st = TextEditState::new("12");
        let font = FontId::from_index(0);
        assert_eq!(st.x_to_cursor(100.0, font, 14.0, &fs, 1.0), 0);
    }
}

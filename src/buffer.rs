use std::ops::Range;

use unicode_width::UnicodeWidthStr;

/// What a tab turns into in the document.
pub const TAB_STOP: &str = "    ";

/// The document being edited.
///
/// `cursor` and `anchor` are byte offsets that always sit on char boundaries.
/// A selection exists while the anchor is set and differs from the cursor.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
            anchor: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero-based (line, column) of the cursor, column in terminal cells.
    pub fn cursor_position(&self) -> (usize, usize) {
        let row = self.text[..self.cursor].matches('\n').count();
        let col = self.text[self.line_start(self.cursor)..self.cursor].width();
        (row, col)
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.anchor
            .filter(|&a| a != self.cursor)
            .map(|a| a.min(self.cursor)..a.max(self.cursor))
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection().map(|r| &self.text[r])
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.delete_selection();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Insert generated text on its own lines at the cursor and move the
    /// cursor past it. Tabs become spaces so cells match what is drawn.
    pub fn insert_generated(&mut self, generated: &str) {
        self.anchor = None;
        self.insert_str(&format!("\n{}\n", generated.replace('\t', TAB_STOP)));
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary(self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.delete_selection() || self.cursor == self.text.len() {
            return;
        }
        let next = self.next_boundary(self.cursor);
        self.text.replace_range(self.cursor..next, "");
    }

    pub fn move_left(&mut self, select: bool) {
        self.begin_move(select);
        self.cursor = self.prev_boundary(self.cursor);
    }

    pub fn move_right(&mut self, select: bool) {
        self.begin_move(select);
        self.cursor = self.next_boundary(self.cursor);
    }

    pub fn move_up(&mut self, select: bool) {
        self.begin_move(select);
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.column();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_at_column(prev_start, col);
    }

    pub fn move_down(&mut self, select: bool) {
        self.begin_move(select);
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let col = self.column();
        self.cursor = self.offset_at_column(end + 1, col);
    }

    pub fn move_home(&mut self, select: bool) {
        self.begin_move(select);
        self.cursor = self.line_start(self.cursor);
    }

    pub fn move_end(&mut self, select: bool) {
        self.begin_move(select);
        self.cursor = self.line_end(self.cursor);
    }

    fn begin_move(&mut self, select: bool) {
        if select {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
    }

    /// Remove the selected text, if any. Returns whether anything was removed.
    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.anchor = None;
            return false;
        };
        self.cursor = range.start;
        self.text.replace_range(range, "");
        self.anchor = None;
        true
    }

    fn column(&self) -> usize {
        self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count()
    }

    fn prev_boundary(&self, i: usize) -> usize {
        self.text[..i]
            .char_indices()
            .next_back()
            .map(|(j, _)| j)
            .unwrap_or(0)
    }

    fn next_boundary(&self, i: usize) -> usize {
        self.text[i..]
            .chars()
            .next()
            .map(|c| i + c.len_utf8())
            .unwrap_or(i)
    }

    fn line_start(&self, i: usize) -> usize {
        self.text[..i].rfind('\n').map(|j| j + 1).unwrap_or(0)
    }

    fn line_end(&self, i: usize) -> usize {
        self.text[i..]
            .find('\n')
            .map(|j| i + j)
            .unwrap_or(self.text.len())
    }

    fn offset_at_column(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.text[start..end]
            .char_indices()
            .nth(col)
            .map(|(j, _)| start + j)
            .unwrap_or(end)
    }
}

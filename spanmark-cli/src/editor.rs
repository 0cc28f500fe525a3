//! Cursor and selection tracking over the active document's text.
//!
//! The cursor lives in (row, char-column) space for movement, but
//! everything handed to the core is a byte offset. Selection anchors are
//! recorded as raw offsets and snapshotted into a `SelectionEvent` when
//! visual mode ends; normalizing backward drags is the resolver's job,
//! not ours.

use spanmark_core::SelectionEvent;

pub struct EditorCursor {
    row: usize,
    col: usize,
    lines: Vec<String>,
    line_starts: Vec<usize>,
    anchor: Option<usize>,
}

impl EditorCursor {
    pub fn new() -> Self {
        Self {
            row: 0,
            col: 0,
            lines: Vec::new(),
            line_starts: vec![0],
            anchor: None,
        }
    }

    /// Load new content, resetting cursor and any selection anchor
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(String::from).collect();
        self.line_starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                self.line_starts.push(i + c.len_utf8());
            }
        }
        self.row = 0;
        self.col = 0;
        self.anchor = None;
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    fn line_chars(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    /// Byte offset of the cursor within the content
    pub fn offset(&self) -> usize {
        let start = self.line_starts.get(self.row).copied().unwrap_or(0);
        let line = self.line(self.row);
        let within: usize = line.chars().take(self.col).map(char::len_utf8).sum();
        start + within
    }

    /// Move the cursor to the position containing `offset`
    pub fn set_offset(&mut self, offset: usize) {
        let row = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.line_starts.get(row).copied().unwrap_or(0);
        let col = self
            .line(row)
            .char_indices()
            .take_while(|(i, _)| start + i < offset)
            .count();
        self.row = row.min(self.lines.len().saturating_sub(1));
        self.col = col;
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.line_chars(self.row));
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        if !self.lines.is_empty() {
            self.row = self.lines.len() - 1;
            self.col = 0;
        }
    }

    pub fn move_word_forward(&mut self) {
        let chars: Vec<char> = self.line(self.row).chars().collect();
        let mut col = self.col;
        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }
        if col >= chars.len() && self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            self.col = col;
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_chars(self.row);
            }
            return;
        }
        let chars: Vec<char> = self.line(self.row).chars().collect();
        let mut col = self.col;
        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }
        self.col = col;
    }

    // Selection

    pub fn begin_selection(&mut self) {
        self.anchor = Some(self.offset());
    }

    /// Current selection as an ordered byte range, for display
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        let focus = self.offset();
        Some((anchor.min(focus), anchor.max(focus)))
    }

    pub fn cancel_selection(&mut self) {
        self.anchor = None;
    }

    /// End the gesture and snapshot it for the selection resolver. The
    /// captured text is ordered even when the drag was backward; the raw
    /// offsets are passed through untouched.
    pub fn take_selection_event(&mut self, content: &str) -> Option<SelectionEvent> {
        let anchor = self.anchor.take()?;
        let focus = self.offset();
        let (start, end) = (anchor.min(focus), anchor.max(focus));
        let text = content.get(start..end).unwrap_or_default().to_string();
        Some(SelectionEvent::new(text, anchor, focus))
    }
}

impl Default for EditorCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_tracks_lines() {
        let mut cursor = EditorCursor::new();
        cursor.set_content("Hello\nWorld");

        assert_eq!(cursor.offset(), 0);
        cursor.move_down();
        assert_eq!(cursor.offset(), 6);
        cursor.move_right();
        cursor.move_right();
        assert_eq!(cursor.offset(), 8);
    }

    #[test]
    fn test_offset_counts_bytes_for_wide_chars() {
        let mut cursor = EditorCursor::new();
        cursor.set_content("caf\u{e9} noir");

        for _ in 0..5 {
            cursor.move_right();
        }
        // "café " is six bytes, five chars
        assert_eq!(cursor.offset(), 6);
    }

    #[test]
    fn test_set_offset_round_trips() {
        let mut cursor = EditorCursor::new();
        cursor.set_content("Hello\nWorld\nagain");

        cursor.set_offset(8);
        assert_eq!(cursor.position(), (1, 2));
        assert_eq!(cursor.offset(), 8);

        cursor.set_offset(6);
        assert_eq!(cursor.position(), (1, 0));
    }

    #[test]
    fn test_backward_drag_snapshots_ordered_text() {
        let mut cursor = EditorCursor::new();
        let content = "The quick brown fox";
        cursor.set_content(content);

        cursor.set_offset(19);
        cursor.begin_selection();
        cursor.set_offset(16);

        let event = cursor.take_selection_event(content).unwrap();
        assert_eq!(event.text, "fox");
        assert_eq!(event.anchor, 19);
        assert_eq!(event.focus, 16);
        assert!(cursor.selection_range().is_none());
    }
}

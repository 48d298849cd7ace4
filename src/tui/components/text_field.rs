//! # TextField Component
//!
//! An editable text box used by the detail form. Single-line fields ignore
//! newlines; the multi-line variant holds the news body.
//!
//! A single-line field pre-filled with text containing line breaks shows it
//! flattened, but hands back the original text until the user edits it.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The label and focus flag are
//! props set by the form. The cursor is a byte offset into the buffer and
//! always sits on a char boundary.
//!
//! Text is not wrapped. The view scrolls both ways to keep the cursor visible,
//! and columns are measured in display width so full-width (CJK) characters
//! take two cells.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// What an accepted event did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
    CursorMoved,
}

pub struct TextField {
    /// Block title (Prop)
    pub label: &'static str,
    /// Whether this field has keyboard focus (Prop)
    pub focused: bool,
    buffer: String,
    /// Byte offset in `buffer` (0..=buffer.len())
    cursor: usize,
    multiline: bool,
    /// (row, column) of the top-left visible cell
    scroll: (u16, u16),
    /// Pre-filled text that could not be shown as-is, kept until edited
    original: Option<String>,
}

impl TextField {
    pub fn single_line(label: &'static str, text: &str) -> Self {
        let flat = text.replace(['\r', '\n'], " ");
        let mut field = Self::new(label, &flat, false);
        if flat != text {
            field.original = Some(text.to_string());
        }
        field
    }

    pub fn multi_line(label: &'static str, text: &str) -> Self {
        Self::new(label, &normalize_newlines(text), true)
    }

    fn new(label: &'static str, text: &str, multiline: bool) -> Self {
        Self {
            label,
            focused: false,
            buffer: text.to_string(),
            cursor: text.len(),
            multiline,
            scroll: (0, 0),
            original: None,
        }
    }

    pub fn text(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.buffer)
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    fn insert_str(&mut self, text: &str) {
        let text = if self.multiline {
            normalize_newlines(text)
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Byte offset where the cursor's line starts.
    fn line_start(&self) -> usize {
        self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Byte offset where the cursor's line ends (before its `\n`).
    fn line_end(&self) -> usize {
        self.buffer[self.cursor..]
            .find('\n')
            .map_or(self.buffer.len(), |i| self.cursor + i)
    }

    /// Zero-based line of the cursor.
    fn cursor_line(&self) -> usize {
        self.buffer[..self.cursor].matches('\n').count()
    }

    /// Display column of the cursor within its line.
    fn cursor_column(&self) -> usize {
        self.buffer[self.line_start()..self.cursor].width()
    }

    /// Move to the previous (-1) or next (+1) line, keeping the display column.
    /// Returns `false` at the first/last line.
    fn move_vertically(&mut self, direction: i8) -> bool {
        let column = self.cursor_column();
        let (target_start, target_end) = if direction < 0 {
            let start = self.line_start();
            if start == 0 {
                return false;
            }
            let prev_end = start - 1;
            let prev_start = self.buffer[..prev_end].rfind('\n').map_or(0, |i| i + 1);
            (prev_start, prev_end)
        } else {
            let end = self.line_end();
            if end == self.buffer.len() {
                return false;
            }
            let next_start = end + 1;
            let next_end = self.buffer[next_start..]
                .find('\n')
                .map_or(self.buffer.len(), |i| next_start + i);
            (next_start, next_end)
        };

        self.cursor = offset_at_column(&self.buffer[target_start..target_end], column) + target_start;
        true
    }

    /// Adjust scrolling so the cursor is inside a `width` x `height` viewport.
    fn scroll_to_cursor(&mut self, width: u16, height: u16) {
        let line = self.cursor_line() as u16;
        let column = self.cursor_column() as u16;
        let (mut row_offset, mut col_offset) = self.scroll;

        if line < row_offset {
            row_offset = line;
        } else if height > 0 && line >= row_offset + height {
            row_offset = line + 1 - height;
        }

        if column < col_offset {
            col_offset = column;
        } else if width > 0 && column >= col_offset + width {
            col_offset = column + 1 - width;
        }

        self.scroll = (row_offset, col_offset);
    }

    /// Screen position of the cursor inside `inner` (the area within borders).
    pub fn cursor_position(&mut self, inner: Rect) -> Position {
        self.scroll_to_cursor(inner.width, inner.height);
        let line = self.cursor_line() as u16;
        let column = self.cursor_column() as u16;
        Position {
            x: inner.x + column - self.scroll.1,
            y: inner.y + line - self.scroll.0,
        }
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.label);
        let inner = block.inner(area);

        let cursor = self.cursor_position(inner);
        let paragraph = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll(self.scroll);
        frame.render_widget(paragraph, area);

        if self.focused {
            frame.set_cursor_position(cursor);
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let result = self.edit(event);
        if result == Some(FieldEvent::Changed) {
            self.original = None;
        }
        result
    }
}

impl TextField {
    fn edit(&mut self, event: &TuiEvent) -> Option<FieldEvent> {
        match event {
            TuiEvent::InputChar('\n') | TuiEvent::Submit if self.multiline => {
                self.insert_str("\n");
                Some(FieldEvent::Changed)
            }
            TuiEvent::InputChar('\n') => None,
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FieldEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let start = self.line_start();
                (self.cursor != start).then(|| {
                    self.cursor = start;
                    FieldEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let end = self.line_end();
                (self.cursor != end).then(|| {
                    self.cursor = end;
                    FieldEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp if self.multiline => {
                self.move_vertically(-1).then_some(FieldEvent::CursorMoved)
            }
            TuiEvent::CursorDown if self.multiline => {
                self.move_vertically(1).then_some(FieldEvent::CursorMoved)
            }
            _ => None,
        }
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Byte offset in `line` of the last char that starts at or before `column`.
fn offset_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (i, c) in line.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > column {
            return i;
        }
        width += w;
    }
    line.len()
}

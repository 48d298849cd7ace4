//! # TitleBar Component
//!
//! Top status bar showing which file is being edited and what just happened.
//!
//! ## Conditional Formatting
//!
//! 1. **Unsaved changes**: `"Newsdesk | news.json (3 items) ● unsaved | Added 1 item"`
//! 2. **Status message**: `"Newsdesk | news.json (3 items) | Saved 3 items at 10:12:00"`
//! 3. **Default**: `"Newsdesk | news.json (3 items)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `file_name`: Name of the data file (not the full path)
/// - `item_count`: Number of records in the session
/// - `dirty`: Whether there are unsaved changes
/// - `status_message`: Transient status (e.g., "Deleted \"Holiday\"")
pub struct TitleBar {
    pub file_name: String,
    pub item_count: usize,
    pub dirty: bool,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(file_name: String, item_count: usize, dirty: bool, status_message: String) -> Self {
        Self {
            file_name,
            item_count,
            dirty,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let noun = if self.item_count == 1 { "item" } else { "items" };
        let mut spans = vec![Span::raw(format!(
            "Newsdesk | {} ({} {noun})",
            self.file_name, self.item_count
        ))];

        if self.dirty {
            spans.push(Span::styled(" ● unsaved", Style::default().fg(Color::Yellow)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

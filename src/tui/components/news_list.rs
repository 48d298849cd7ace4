//! # NewsList Component
//!
//! The main table: one row per record with date, category and title.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `NewsListState` lives in `TuiState` (scroll offset, last drawn area)
//! - `NewsList` is created each frame with borrowed state and the rows as props
//!
//! The selected row comes from the session; the table only mirrors it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState};

use crate::core::record::NEW_MENU_CATEGORY;
use crate::core::session::ListRow;
use crate::tui::component::Component;

/// Rows taken by the top border and the header line.
const HEADER_ROWS: u16 = 2;

const HELP_TEXT: &str = " a Add  e Edit  d Delete  s Save  q Quit ";

/// Persistent state for the news table.
#[derive(Default)]
pub struct NewsListState {
    pub table_state: TableState,
    /// Where the table was drawn last frame (for mouse hit testing)
    pub area: Rect,
}

impl NewsListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data rows that fit in the last drawn area.
    pub fn page_size(&self) -> usize {
        self.area.height.saturating_sub(HEADER_ROWS + 1).max(1) as usize
    }

    /// Hit test: which record index (if any) is drawn at this screen cell.
    pub fn row_at(&self, column: u16, row: u16, row_count: usize) -> Option<usize> {
        let area = self.area;
        let first_row_y = area.y + HEADER_ROWS;
        let last_row_y = area.y + area.height.saturating_sub(1); // bottom border
        if column < area.x || column >= area.x + area.width {
            return None;
        }
        if row < first_row_y || row >= last_row_y {
            return None;
        }
        let index = (row - first_row_y) as usize + self.table_state.offset();
        (index < row_count).then_some(index)
    }
}

/// Transient render wrapper for the news table.
pub struct NewsList<'a> {
    state: &'a mut NewsListState,
    rows: Vec<ListRow<'a>>,
    selected: Option<usize>,
}

impl<'a> NewsList<'a> {
    pub fn new(
        state: &'a mut NewsListState,
        rows: impl Iterator<Item = ListRow<'a>>,
        selected: Option<usize>,
    ) -> Self {
        Self {
            state,
            rows: rows.collect(),
            selected,
        }
    }
}

impl Component for NewsList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" News ({}) ", self.rows.len()))
            .title_bottom(Line::from(HELP_TEXT).centered());

        if self.rows.is_empty() {
            let empty = Paragraph::new("No news yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block.padding(Padding::top(1)));
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(["Date", "Category", "Title"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|row| {
            let category_style = if row.category == NEW_MENU_CATEGORY {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Row::new([
                Cell::from(row.date),
                Cell::from(row.category).style(category_style),
                Cell::from(row.title),
            ])
        });

        let widths = [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Fill(1),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );

        self.state.table_state.select(self.selected);
        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }
}

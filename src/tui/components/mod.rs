//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing the file, item count and status
//! - `NoticeDialog`: A notification from the session
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `NewsList`: The record table, with scroll offset and hit testing
//! - `RecordForm`: The modal detail form
//! - `TextField`: One editable field inside the form
//! - `ConfirmDialog`: A yes/no question
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (function parameters), not by
//! directly accessing global state. This makes dependencies explicit and
//! components testable.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, layout helpers)
//! ├── title_bar.rs     (Top status bar)
//! ├── news_list.rs     (Record table)
//! ├── record_form.rs   (Modal detail form)
//! ├── text_field.rs    (Editable text box)
//! └── dialog.rs        (Confirm + notice dialogs)
//! ```

pub mod dialog;
pub mod news_list;
pub mod record_form;
pub mod text_field;
mod title_bar;

pub use dialog::{ConfirmDialog, ConfirmEvent, NoticeDialog};
pub use news_list::{NewsList, NewsListState};
pub use record_form::{FormEvent, RecordForm, RecordFormState};
pub use title_bar::TitleBar;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// Compute a centered rect of a fixed size, clamped to the outer rect.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let [center_v] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(center_v);
    center
}

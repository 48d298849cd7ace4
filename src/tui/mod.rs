//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Modality
//!
//! Input goes to the topmost open layer only:
//!
//! ```text
//! notice  >  confirmation  >  form  >  list
//! ```
//!
//! so nothing in the list can change while the form or a dialog is open.
//!
//! ## Redraw Strategy
//!
//! There is no animation. The loop sleeps up to 500ms waiting for input and
//! only redraws after events (including terminal resize).

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, ConfirmRequest, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::{EditorSession, Notice};
use crate::core::store::Store;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmDialog, ConfirmEvent, FormEvent, NewsListState, NoticeDialog, RecordFormState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub news_list: NewsListState,
    // Detail form overlay (None = hidden)
    pub form: Option<RecordFormState>,
    // Yes/no overlay (None = hidden)
    pub confirm: Option<ConfirmDialog>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            news_list: NewsListState::new(),
            form: None,
            confirm: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig, startup_notices: Vec<Notice>) -> std::io::Result<()> {
    let mut session = EditorSession::open(Store::new(config.data_path));
    for notice in startup_notices {
        session.push_notice(notice);
    }
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Could not enable mouse/paste support: {}", e);
    }

    let result = event_loop(&mut terminal, &mut session, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Newsdesk exiting");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    session: &mut EditorSession,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, session, tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if dispatch(session, tui, event) {
                return Ok(());
            }
        }
    }
}

/// Route one event to the topmost open layer. Returns `true` to quit.
fn dispatch(session: &mut EditorSession, tui: &mut TuiState, event: TuiEvent) -> bool {
    // Resize just needs a redraw (already flagged by the caller)
    if event == TuiEvent::Resize {
        return false;
    }

    // ForceQuit (Ctrl+C) always quits regardless of what is open
    if event == TuiEvent::ForceQuit {
        info!("Force quit");
        return true;
    }

    if session.notice().is_some() {
        if NoticeDialog::dismisses(&event) {
            update(session, Action::DismissNotice);
        }
        return false;
    }

    if let Some(confirm) = tui.confirm.as_mut() {
        let Some(answer) = confirm.handle_event(&event) else {
            return false;
        };
        tui.confirm = None;
        let action = match answer {
            ConfirmEvent::Yes(ConfirmRequest::Delete(request)) => Action::ConfirmDelete(request),
            ConfirmEvent::Yes(ConfirmRequest::DiscardChanges) => Action::ConfirmQuit,
            ConfirmEvent::No => return false,
        };
        let effect = update(session, action);
        return apply_effect(session, tui, effect);
    }

    if let Some(form) = tui.form.as_mut() {
        match form.handle_event(&event) {
            Some(FormEvent::Submit { target, input }) => {
                tui.form = None;
                let effect = update(session, Action::SubmitForm { target, input });
                return apply_effect(session, tui, effect);
            }
            Some(FormEvent::Cancel) => {
                debug!("Form cancelled");
                tui.form = None;
            }
            None => {}
        }
        return false;
    }

    let Some(action) = list_action(session, tui, &event) else {
        return false;
    };
    let effect = update(session, action);
    apply_effect(session, tui, effect)
}

/// What a key or click means in the list view.
fn list_action(session: &EditorSession, tui: &TuiState, event: &TuiEvent) -> Option<Action> {
    let page = tui.news_list.page_size();
    let action = match event {
        TuiEvent::InputChar('a' | 'n') => Action::Add,
        TuiEvent::InputChar('e') | TuiEvent::Submit => Action::Edit,
        TuiEvent::InputChar('d') | TuiEvent::Delete => Action::Delete,
        TuiEvent::InputChar('s') | TuiEvent::Save => Action::Save,
        TuiEvent::InputChar('q') | TuiEvent::Escape => Action::Quit,
        TuiEvent::InputChar('j') | TuiEvent::CursorDown | TuiEvent::ScrollDown => {
            Action::SelectNext
        }
        TuiEvent::InputChar('k') | TuiEvent::CursorUp | TuiEvent::ScrollUp => {
            Action::SelectPrevious
        }
        TuiEvent::CursorHome => Action::SelectFirst,
        TuiEvent::CursorEnd => Action::SelectLast,
        TuiEvent::PageDown => Action::Select(Some(session.selected().map_or(0, |i| i + page))),
        TuiEvent::PageUp => {
            Action::Select(Some(session.selected().map_or(0, |i| i.saturating_sub(page))))
        }
        TuiEvent::MouseClick(column, row) => {
            let hit = tui.news_list.row_at(*column, *row, session.len())?;
            Action::Select(Some(hit))
        }
        _ => return None,
    };
    Some(action)
}

/// Perform an effect returned by `update`. Returns `true` to quit.
fn apply_effect(session: &mut EditorSession, tui: &mut TuiState, effect: Effect) -> bool {
    match effect {
        Effect::None => false,
        Effect::OpenForm(request) => {
            tui.form = Some(RecordFormState::new(request));
            false
        }
        Effect::Confirm(request) => {
            tui.confirm = Some(ConfirmDialog::new(request));
            false
        }
        Effect::Save => {
            session.save();
            false
        }
        Effect::Quit => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::NoticeKind;
    use crate::test_support::{record, session_with, titles};

    fn send(session: &mut EditorSession, tui: &mut TuiState, events: &[TuiEvent]) -> bool {
        events
            .iter()
            .any(|event| dispatch(session, tui, event.clone()))
    }

    fn chars(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    #[test]
    fn test_add_through_form() {
        let mut session = session_with(vec![record("2025.09.01", "Info", "old")]);
        let mut tui = TuiState::new();

        send(&mut session, &mut tui, &[TuiEvent::InputChar('a')]);
        assert!(tui.form.is_some());

        // List keys go to the form while it is open
        let mut events = chars("2025.10.01");
        events.push(TuiEvent::NextField);
        events.extend(chars("新メニュー"));
        events.push(TuiEvent::NextField);
        events.extend(chars("dq"));
        send(&mut session, &mut tui, &events);
        assert_eq!(session.len(), 1);

        send(&mut session, &mut tui, &[TuiEvent::Save]);
        assert!(tui.form.is_none());
        assert_eq!(titles(&session), vec!["dq", "old"]);
        let added = session.get(0).unwrap();
        assert_eq!(added.datetime, "2025-10-01");
        assert_eq!(added.category_color, "bg-amber-800");
        assert_eq!(added.image, None);
    }

    #[test]
    fn test_cancel_form_changes_nothing() {
        let mut session = session_with(vec![record("", "", "a")]);
        let mut tui = TuiState::new();
        send(&mut session, &mut tui, &[TuiEvent::CursorDown, TuiEvent::Submit]);
        assert!(tui.form.is_some());
        send(&mut session, &mut tui, &chars("changed"));
        send(&mut session, &mut tui, &[TuiEvent::Escape]);
        assert!(tui.form.is_none());
        assert_eq!(titles(&session), vec!["a"]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_edit_without_selection_shows_warning() {
        let mut session = session_with(vec![record("", "", "a")]);
        let mut tui = TuiState::new();
        send(&mut session, &mut tui, &[TuiEvent::InputChar('e')]);
        assert!(tui.form.is_none());
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Warning);

        // The notice swallows input until dismissed
        send(&mut session, &mut tui, &[TuiEvent::InputChar('a')]);
        assert!(tui.form.is_none());
        send(&mut session, &mut tui, &[TuiEvent::Submit]);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut session = session_with(vec![record("", "", "a"), record("", "", "b")]);
        let mut tui = TuiState::new();
        send(&mut session, &mut tui, &[TuiEvent::CursorDown, TuiEvent::InputChar('d')]);
        assert!(tui.confirm.is_some());

        send(&mut session, &mut tui, &[TuiEvent::InputChar('n')]);
        assert!(tui.confirm.is_none());
        assert_eq!(session.len(), 2);

        send(&mut session, &mut tui, &[TuiEvent::InputChar('d'), TuiEvent::InputChar('y')]);
        assert_eq!(titles(&session), vec!["b"]);
    }

    #[test]
    fn test_quit_clean_and_dirty() {
        let mut session = session_with(Vec::new());
        let mut tui = TuiState::new();
        assert!(send(&mut session, &mut tui, &[TuiEvent::InputChar('q')]));

        let mut dirty = session_with(Vec::new());
        send(&mut dirty, &mut tui, &[TuiEvent::InputChar('a'), TuiEvent::Save]);
        assert!(!send(&mut dirty, &mut tui, &[TuiEvent::InputChar('q')]));
        assert!(tui.confirm.is_some());
        assert!(send(&mut dirty, &mut tui, &[TuiEvent::InputChar('y')]));
    }

    #[test]
    fn test_force_quit_ignores_dirty_state() {
        let mut session = session_with(Vec::new());
        let mut tui = TuiState::new();
        send(&mut session, &mut tui, &[TuiEvent::InputChar('a')]);
        assert!(send(&mut session, &mut tui, &[TuiEvent::ForceQuit]));
    }

    #[test]
    fn test_save_writes_file_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        let mut session = EditorSession::new(Store::new(&path), vec![record("", "", "a")]);
        let mut tui = TuiState::new();

        send(&mut session, &mut tui, &[TuiEvent::InputChar('s')]);
        assert!(path.exists());
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn test_click_selects_row() {
        let mut session = session_with(vec![record("", "", "a"), record("", "", "b")]);
        let mut tui = TuiState::new();
        tui.news_list.area = ratatui::layout::Rect::new(0, 1, 80, 20);
        send(&mut session, &mut tui, &[TuiEvent::MouseClick(10, 4)]);
        assert_eq!(session.selected(), Some(1));
        send(&mut session, &mut tui, &[TuiEvent::MouseClick(10, 15)]);
        assert_eq!(session.selected(), Some(1));
    }
}

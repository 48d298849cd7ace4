//! # Dialogs
//!
//! Small centered boxes drawn over everything else:
//!
//! - `ConfirmDialog`: a yes/no question (delete a record, quit without saving)
//! - `NoticeDialog`: an info, warning or error message from the session
//!
//! Both size themselves to their wrapped message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::action::ConfirmRequest;
use crate::core::session::{Notice, NoticeKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_fixed;
use crate::tui::event::TuiEvent;

const MAX_DIALOG_WIDTH: u16 = 64;
/// Borders (2) + horizontal padding (2)
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Borders (2) + blank line above the message (1)
const VERTICAL_OVERHEAD: u16 = 3;

/// Wrap `message` to fit a dialog inside `area`, returning the dialog rect and lines.
fn layout_message(message: &str, area: Rect) -> (Rect, Vec<String>) {
    let width = area.width.min(MAX_DIALOG_WIDTH);
    let text_width = width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
    let lines: Vec<String> = message
        .lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, text_width)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            }
        })
        .collect();
    let height = (lines.len() as u16 + VERTICAL_OVERHEAD).min(area.height);
    (centered_fixed(width, height, area), lines)
}

fn render_box(frame: &mut Frame, area: Rect, title: &str, help: &str, color: Color, message: &str) {
    let (rect, lines) = layout_message(message, area);
    frame.render_widget(Clear, rect);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(help).centered())
        .padding(Padding::new(1, 1, 1, 0));

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(text).block(block), rect);
}

// ============================================================================
// Confirm
// ============================================================================

/// The user's answer to a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    Yes(ConfirmRequest),
    No,
}

pub struct ConfirmDialog {
    pub request: ConfirmRequest,
}

impl ConfirmDialog {
    pub fn new(request: ConfirmRequest) -> Self {
        Self { request }
    }

    fn title(&self) -> &'static str {
        match self.request {
            ConfirmRequest::Delete(_) => "Delete",
            ConfirmRequest::DiscardChanges => "Unsaved changes",
        }
    }

    pub fn message(&self) -> String {
        match &self.request {
            ConfirmRequest::Delete(request) => format!("Delete \"{}\"?", request.label),
            ConfirmRequest::DiscardChanges => {
                "You have unsaved changes.\nQuit and discard them?".to_string()
            }
        }
    }
}

impl Component for ConfirmDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render_box(frame, area, self.title(), " y Yes  n No ", Color::Red, &self.message());
    }
}

impl EventHandler for ConfirmDialog {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('y' | 'Y') | TuiEvent::Submit => {
                Some(ConfirmEvent::Yes(self.request.clone()))
            }
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(ConfirmEvent::No),
            _ => None,
        }
    }
}

// ============================================================================
// Notice
// ============================================================================

/// Renders the session's front notice. Stateless: the notice is a prop.
pub struct NoticeDialog<'a> {
    notice: &'a Notice,
}

impl<'a> NoticeDialog<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    /// Whether this event closes a notice.
    pub fn dismisses(event: &TuiEvent) -> bool {
        matches!(
            event,
            TuiEvent::Submit | TuiEvent::Escape | TuiEvent::InputChar(' ')
        )
    }
}

impl Component for NoticeDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = match self.notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Warning => Color::Yellow,
            NoticeKind::Error => Color::Red,
        };
        render_box(
            frame,
            area,
            &self.notice.title,
            " Enter OK ",
            color,
            &self.notice.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{DeleteRequest, EditorSession};
    use crate::test_support::{record, session_with};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn delete_request(session: &mut EditorSession) -> DeleteRequest {
        session.select(Some(0));
        session.begin_delete().unwrap()
    }

    fn render_text(component: &mut dyn Component) -> String {
        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| component.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect::<String>()
    }

    #[test]
    fn test_confirm_delete_names_record() {
        let mut session = session_with(vec![record("", "", "Closed on Monday")]);
        let mut dialog = ConfirmDialog::new(ConfirmRequest::Delete(delete_request(&mut session)));
        assert_eq!(dialog.message(), "Delete \"Closed on Monday\"?");

        let text = render_text(&mut dialog);
        assert!(text.contains("Closed on Monday"));
        assert!(text.contains("y Yes"));
    }

    #[test]
    fn test_confirm_answers() {
        let mut dialog = ConfirmDialog::new(ConfirmRequest::DiscardChanges);
        assert_eq!(
            dialog.handle_event(&TuiEvent::InputChar('y')),
            Some(ConfirmEvent::Yes(ConfirmRequest::DiscardChanges))
        );
        assert_eq!(
            dialog.handle_event(&TuiEvent::Submit),
            Some(ConfirmEvent::Yes(ConfirmRequest::DiscardChanges))
        );
        assert_eq!(dialog.handle_event(&TuiEvent::Escape), Some(ConfirmEvent::No));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('n')), Some(ConfirmEvent::No));
        assert_eq!(dialog.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_notice_renders_title_and_message() {
        let notice = Notice::error("Read error", "failed to read /data/news.json: invalid JSON");
        let text = render_text(&mut NoticeDialog::new(&notice));
        assert!(text.contains("Read error"));
        assert!(text.contains("/data/news.json"));
        assert!(text.contains("Enter OK"));
    }

    #[test]
    fn test_long_message_wraps_within_dialog() {
        let message = "word ".repeat(40);
        let area = Rect::new(0, 0, 100, 30);
        let (rect, lines) = layout_message(&message, area);
        assert_eq!(rect.width, MAX_DIALOG_WIDTH);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= (MAX_DIALOG_WIDTH - HORIZONTAL_OVERHEAD) as usize));
        assert_eq!(rect.height, lines.len() as u16 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_notice_dismiss_keys() {
        assert!(NoticeDialog::dismisses(&TuiEvent::Submit));
        assert!(NoticeDialog::dismisses(&TuiEvent::Escape));
        assert!(!NoticeDialog::dismisses(&TuiEvent::InputChar('a')));
    }
}

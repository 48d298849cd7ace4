//! # Record Form Component
//!
//! Modal overlay for creating or editing one news item. Opened with `a`
//! (empty) or `e`/Enter (pre-filled from the selected row).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecordFormState` lives in `TuiState` while the form is open
//! - `RecordForm` is created each frame with borrowed state
//!
//! The form accepts whatever is typed, including empty fields. Derived
//! fields are filled in by the core when the submission is applied.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding};

use crate::core::record::FormInput;
use crate::core::session::{FormRequest, FormTarget};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;

const HELP_TEXT: &str = " Tab Next field  Ctrl+S Save  Esc Cancel ";

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Title,
    Image,
    Content,
}

impl FormField {
    const ALL: [FormField; 5] = [
        FormField::Date,
        FormField::Category,
        FormField::Title,
        FormField::Image,
        FormField::Content,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Events emitted by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit { target: FormTarget, input: FormInput },
    Cancel,
}

/// Persistent state for the form overlay.
pub struct RecordFormState {
    target: FormTarget,
    fields: [TextField; 5],
    focus: FormField,
    /// Where each field was drawn last frame (for mouse focus)
    field_areas: [Rect; 5],
}

impl RecordFormState {
    pub fn new(request: FormRequest) -> Self {
        let input = request.input;
        let mut state = Self {
            target: request.target,
            fields: [
                TextField::single_line(" Date (e.g. 2025.09.30) ", &input.date),
                TextField::single_line(" Category ", &input.category),
                TextField::single_line(" Title ", &input.title),
                TextField::single_line(" Image file name (optional) ", &input.image),
                TextField::multi_line(" Content ", &input.content),
            ],
            focus: FormField::Date,
            field_areas: [Rect::default(); 5],
        };
        state.set_focus(FormField::Date);
        state
    }

    pub fn is_new(&self) -> bool {
        self.target == FormTarget::New
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    fn set_focus(&mut self, focus: FormField) {
        self.focus = focus;
        for (field, text_field) in FormField::ALL.iter().zip(self.fields.iter_mut()) {
            text_field.focused = *field == focus;
        }
    }

    fn field(&self, field: FormField) -> &TextField {
        &self.fields[field.index()]
    }

    fn focused_field(&mut self) -> &mut TextField {
        &mut self.fields[self.focus.index()]
    }

    /// Current contents of the five fields.
    pub fn input(&self) -> FormInput {
        FormInput {
            date: self.field(FormField::Date).text().to_string(),
            category: self.field(FormField::Category).text().to_string(),
            title: self.field(FormField::Title).text().to_string(),
            image: self.field(FormField::Image).text().to_string(),
            content: self.field(FormField::Content).text().to_string(),
        }
    }

    fn field_at(&self, column: u16, row: u16) -> Option<FormField> {
        let position = Position { x: column, y: row };
        FormField::ALL
            .into_iter()
            .find(|field| self.field_areas[field.index()].contains(position))
    }
}

impl EventHandler for RecordFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Save => {
                return Some(FormEvent::Submit {
                    target: self.target,
                    input: self.input(),
                });
            }
            TuiEvent::NextField => {
                self.set_focus(self.focus.next());
                return None;
            }
            TuiEvent::PrevField => {
                self.set_focus(self.focus.previous());
                return None;
            }
            TuiEvent::MouseClick(column, row) => {
                if let Some(field) = self.field_at(*column, *row) {
                    self.set_focus(field);
                }
                return None;
            }
            _ => {}
        }

        if self.focused_field().handle_event(event).is_some() {
            return None;
        }

        // Unconsumed keys on single-line fields move between fields
        match event {
            TuiEvent::Submit | TuiEvent::CursorDown if self.focus != FormField::Content => {
                self.set_focus(self.focus.next());
            }
            TuiEvent::CursorUp if self.focus != FormField::Date => {
                self.set_focus(self.focus.previous());
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the form overlay.
pub struct RecordForm<'a> {
    state: &'a mut RecordFormState,
}

impl<'a> RecordForm<'a> {
    pub fn new(state: &'a mut RecordFormState) -> Self {
        Self { state }
    }
}

impl Component for RecordForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 90, area);
        frame.render_widget(Clear, overlay);

        let title = if self.state.is_new() {
            " New news "
        } else {
            " Edit news "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(HELP_TEXT).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        use Constraint::{Length, Min};
        let areas: [Rect; 5] =
            Layout::vertical([Length(3), Length(3), Length(3), Length(3), Min(3)]).areas(inner);

        self.state.field_areas = areas;
        for (field, field_area) in self.state.fields.iter_mut().zip(areas) {
            field.render(frame, field_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, session_with};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(form: &mut RecordFormState, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn new_form() -> RecordFormState {
        RecordFormState::new(session_with(Vec::new()).begin_add())
    }

    #[test]
    fn test_new_form_is_empty_and_focuses_date() {
        let form = new_form();
        assert!(form.is_new());
        assert_eq!(form.focus(), FormField::Date);
        assert_eq!(form.input(), FormInput::default());
    }

    #[test]
    fn test_fill_every_field_and_submit() {
        let mut form = new_form();
        type_str(&mut form, "2025.10.01");
        form.handle_event(&TuiEvent::NextField);
        type_str(&mut form, "新メニュー");
        form.handle_event(&TuiEvent::Submit); // Enter moves on from single-line fields
        type_str(&mut form, "Pumpkin pie");
        form.handle_event(&TuiEvent::CursorDown);
        type_str(&mut form, "pie.jpg");
        form.handle_event(&TuiEvent::Submit);
        assert_eq!(form.focus(), FormField::Content);
        type_str(&mut form, "Line one");
        form.handle_event(&TuiEvent::Submit); // Enter is a newline in Content
        type_str(&mut form, "Line two");

        let event = form.handle_event(&TuiEvent::Save);
        assert_eq!(
            event,
            Some(FormEvent::Submit {
                target: FormTarget::New,
                input: FormInput {
                    date: "2025.10.01".to_string(),
                    category: "新メニュー".to_string(),
                    title: "Pumpkin pie".to_string(),
                    image: "pie.jpg".to_string(),
                    content: "Line one\nLine two".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_empty_form_submits_as_is() {
        let mut form = new_form();
        assert_eq!(
            form.handle_event(&TuiEvent::Save),
            Some(FormEvent::Submit {
                target: FormTarget::New,
                input: FormInput::default(),
            })
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = new_form();
        type_str(&mut form, "typed");
        assert_eq!(form.handle_event(&TuiEvent::Escape), Some(FormEvent::Cancel));
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut form = new_form();
        form.handle_event(&TuiEvent::PrevField);
        assert_eq!(form.focus(), FormField::Content);
        form.handle_event(&TuiEvent::NextField);
        assert_eq!(form.focus(), FormField::Date);
        form.handle_event(&TuiEvent::CursorUp);
        assert_eq!(form.focus(), FormField::Date);
    }

    #[test]
    fn test_edit_form_is_prefilled() {
        let mut existing = record("2025.09.30", "Info", "Holiday");
        existing.image = Some("./images/holiday.png".to_string());
        let mut session = session_with(vec![existing]);
        session.select(Some(0));

        let form = RecordFormState::new(session.begin_edit().unwrap());
        assert!(!form.is_new());
        let input = form.input();
        assert_eq!(input.date, "2025.09.30");
        assert_eq!(input.title, "Holiday");
        assert_eq!(input.image, "holiday.png");
    }

    #[test]
    fn test_untouched_fields_submit_original_text() {
        let existing = record("2025.09.30", "Info", "Two\nlines");
        let mut session = session_with(vec![existing]);
        session.select(Some(0));

        let mut form = RecordFormState::new(session.begin_edit().unwrap());
        form.handle_event(&TuiEvent::NextField);
        type_str(&mut form, "!");
        let Some(FormEvent::Submit { input, .. }) = form.handle_event(&TuiEvent::Save) else {
            panic!("Ctrl+S should submit");
        };
        assert_eq!(input.category, "Info!");
        assert_eq!(input.title, "Two\nlines");
    }

    #[test]
    fn test_render_and_click_to_focus() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = new_form();

        terminal
            .draw(|f| RecordForm::new(&mut form).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("New news"));
        assert!(text.contains("Date (e.g. 2025.09.30)"));
        assert!(text.contains("Image file name (optional)"));
        assert!(text.contains("Ctrl+S Save"));

        let title_area = form.field_areas[FormField::Title.index()];
        form.handle_event(&TuiEvent::MouseClick(title_area.x + 2, title_area.y + 1));
        assert_eq!(form.focus(), FormField::Title);
    }
}

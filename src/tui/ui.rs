use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::session::EditorSession;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{NewsList, NoticeDialog, RecordForm, TitleBar};

/// Draw the whole screen: title bar and table, then any open overlays in
/// stacking order (form, confirmation, notice).
pub fn draw_ui(frame: &mut Frame, session: &EditorSession, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [title_area, main_area] = layout.areas(frame.area());

    let file_name = session
        .store()
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    TitleBar::new(
        file_name,
        session.len(),
        session.is_dirty(),
        session.status_message.clone(),
    )
    .render(frame, title_area);

    NewsList::new(&mut tui.news_list, session.rows(), session.selected())
        .render(frame, main_area);

    let area = frame.area();
    if let Some(form) = tui.form.as_mut() {
        RecordForm::new(form).render(frame, area);
    }
    if let Some(confirm) = tui.confirm.as_mut() {
        confirm.render(frame, area);
    }
    if let Some(notice) = session.notice() {
        NoticeDialog::new(notice).render(frame, area);
    }
}

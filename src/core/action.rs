//! # Actions
//!
//! Everything the user can do in Newsdesk becomes an `Action`.
//! User presses `a`? That's `Action::Add`. Confirms a delete?
//! That's `Action::ConfirmDelete(request)`.
//!
//! The `update()` function takes the session and an action, mutates the
//! session, and returns an `Effect` telling the adapter what to do next
//! (open the form, ask for confirmation, write the file, quit).
//! No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```

use log::debug;

use crate::core::record::FormInput;
use crate::core::session::{
    DeleteRequest, EditorSession, FormRequest, FormTarget, Notice, SessionError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    Select(Option<usize>),
    Add,
    Edit,
    Delete,
    SubmitForm { target: FormTarget, input: FormInput },
    ConfirmDelete(DeleteRequest),
    Save,
    DismissNotice,
    Quit,
    ConfirmQuit,
}

/// Questions that need a yes/no before anything happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    Delete(DeleteRequest),
    DiscardChanges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    OpenForm(FormRequest),
    Confirm(ConfirmRequest),
    Save,
    Quit,
}

pub fn update(session: &mut EditorSession, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::SelectNext => {
            session.select_next();
            Effect::None
        }
        Action::SelectPrevious => {
            session.select_previous();
            Effect::None
        }
        Action::SelectFirst => {
            session.select_first();
            Effect::None
        }
        Action::SelectLast => {
            session.select_last();
            Effect::None
        }
        Action::Select(index) => {
            session.select(index);
            Effect::None
        }
        Action::Add => Effect::OpenForm(session.begin_add()),
        Action::Edit => match session.begin_edit() {
            Ok(request) => Effect::OpenForm(request),
            Err(e) => no_selection(session, e, "edit"),
        },
        Action::Delete => match session.begin_delete() {
            Ok(request) => Effect::Confirm(ConfirmRequest::Delete(request)),
            Err(e) => no_selection(session, e, "delete"),
        },
        Action::SubmitForm { target, input } => {
            session.commit_form(target, input);
            Effect::None
        }
        Action::ConfirmDelete(request) => {
            session.confirm_delete(&request);
            Effect::None
        }
        Action::Save => Effect::Save,
        Action::DismissNotice => {
            session.dismiss_notice();
            Effect::None
        }
        Action::Quit if session.is_dirty() => Effect::Confirm(ConfirmRequest::DiscardChanges),
        Action::Quit | Action::ConfirmQuit => Effect::Quit,
    }
}

fn no_selection(session: &mut EditorSession, error: SessionError, verb: &str) -> Effect {
    session.push_notice(Notice::warning(
        "Nothing selected",
        format!("{error} Pick the item you want to {verb}."),
    ));
    Effect::None
}

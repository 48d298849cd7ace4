//! # Editor Session
//!
//! The in-memory collection plus everything the list view needs to know
//! about it: which row is selected, whether there are unsaved changes, and
//! which notifications are waiting to be shown.
//!
//! ```text
//! EditorSession
//! ├── store: Store                  // where load/save go
//! ├── entries: Vec<Entry>           // records in display order
//! ├── selected: Option<usize>       // positional selection
//! ├── notices: VecDeque<Notice>     // modal notifications, front first
//! ├── status_message: String        // title bar text
//! └── dirty: bool                   // unsaved changes
//! ```
//!
//! The UI refers to records by position. Each entry also carries a
//! `RecordId` that is never persisted; requests handed to the form and the
//! delete prompt remember both, and the session checks the id before
//! touching anything.

use std::collections::VecDeque;
use std::fmt;

use chrono::Local;
use log::{debug, info, warn};

use crate::core::record::{FormInput, NewsRecord};
use crate::core::store::Store;

/// In-memory identity of a record. Not written to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

#[derive(Clone, Debug)]
struct Entry {
    id: RecordId,
    record: NewsRecord,
}

impl Entry {
    fn new(record: NewsRecord) -> Self {
        Self {
            id: RecordId::new(),
            record,
        }
    }
}

/// One row of the list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub date: &'a str,
    pub category: &'a str,
    pub title: &'a str,
}

/// Which record a form submission should land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormTarget {
    New,
    Existing { index: usize, id: RecordId },
}

/// Everything the detail form needs to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormRequest {
    pub target: FormTarget,
    pub input: FormInput,
}

impl FormRequest {
    pub fn is_new(&self) -> bool {
        self.target == FormTarget::New
    }
}

/// A pending delete, waiting for the user to confirm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteRequest {
    pub index: usize,
    pub id: RecordId,
    /// Title shown in the prompt (placeholder when empty).
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A modal notification. The UI shows the front of the queue until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Edit/delete was requested with no row selected.
    NoSelection,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoSelection => write!(f, "Select a news item in the list first."),
        }
    }
}

impl std::error::Error for SessionError {}

pub struct EditorSession {
    store: Store,
    entries: Vec<Entry>,
    selected: Option<usize>,
    notices: VecDeque<Notice>,
    pub status_message: String,
    dirty: bool,
}

impl EditorSession {
    /// Start a session from the given records without touching the store.
    pub fn new(store: Store, records: Vec<NewsRecord>) -> Self {
        Self {
            store,
            entries: records.into_iter().map(Entry::new).collect(),
            selected: None,
            notices: VecDeque::new(),
            status_message: String::new(),
            dirty: false,
        }
    }

    /// Load the store. A failed read still opens the session, just empty.
    pub fn open(store: Store) -> Self {
        let existed = store.exists();
        match store.load() {
            Ok(records) => {
                let status_message = if existed {
                    format!("Loaded {} items from {}", records.len(), store.path().display())
                } else {
                    format!("{} not found, starting empty", store.path().display())
                };
                let mut session = Self::new(store, records);
                session.status_message = status_message;
                session
            }
            Err(e) => {
                warn!("{e}");
                let mut session = Self::new(store, Vec::new());
                session.status_message = "Read failed, starting empty".to_string();
                session.push_notice(Notice::error("Read error", e.to_string()));
                session
            }
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, index: usize) -> Option<&NewsRecord> {
        self.entries.get(index).map(|entry| &entry.record)
    }

    /// Records in display order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &NewsRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// `(date, category, title)` for each record, in display order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = ListRow<'_>> {
        self.records().map(|record| ListRow {
            date: &record.date,
            category: &record.category,
            title: &record.title,
        })
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a row; out-of-range indices clamp to the last row.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = match index {
            Some(_) if self.entries.is_empty() => None,
            Some(i) => Some(i.min(self.entries.len() - 1)),
            None => None,
        };
    }

    pub fn select_next(&mut self) {
        let next = self.selected.map_or(0, |i| i + 1);
        self.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let previous = self
            .selected
            .map_or(self.entries.len().saturating_sub(1), |i| i.saturating_sub(1));
        self.select(Some(previous));
    }

    pub fn select_first(&mut self) {
        self.select(Some(0));
    }

    pub fn select_last(&mut self) {
        self.select(Some(self.entries.len().saturating_sub(1)));
    }

    // ------------------------------------------------------------------
    // Add / edit / delete
    // ------------------------------------------------------------------

    /// An empty form for a new record.
    pub fn begin_add(&self) -> FormRequest {
        FormRequest {
            target: FormTarget::New,
            input: FormInput::default(),
        }
    }

    /// A form pre-filled from the selected record.
    pub fn begin_edit(&self) -> Result<FormRequest, SessionError> {
        let index = self.selected.ok_or(SessionError::NoSelection)?;
        let entry = self.entries.get(index).ok_or(SessionError::NoSelection)?;
        Ok(FormRequest {
            target: FormTarget::Existing { index, id: entry.id },
            input: FormInput::from_record(&entry.record),
        })
    }

    /// Apply a submitted form. New records go to the front; edited ones
    /// stay where they were.
    pub fn commit_form(&mut self, target: FormTarget, input: FormInput) {
        let record = input.into_record();
        match target {
            FormTarget::New => {
                info!("Added \"{}\"", record.title);
                self.entries.insert(0, Entry::new(record));
                self.selected = Some(0);
                self.status_message = "Added 1 item".to_string();
            }
            FormTarget::Existing { index, id } => {
                let Some(index) = self.resolve(index, id) else {
                    warn!("Edited record {:?} is gone, dropping the edit", id);
                    self.push_notice(Notice::warning(
                        "Edit not applied",
                        "The item being edited no longer exists.",
                    ));
                    return;
                };
                info!("Edited item {} (\"{}\")", index, record.title);
                self.entries[index].record = record;
                self.selected = Some(index);
                self.status_message = format!("Updated item {}", index + 1);
            }
        }
        self.dirty = true;
    }

    /// A delete prompt for the selected record.
    pub fn begin_delete(&self) -> Result<DeleteRequest, SessionError> {
        let index = self.selected.ok_or(SessionError::NoSelection)?;
        let entry = self.entries.get(index).ok_or(SessionError::NoSelection)?;
        Ok(DeleteRequest {
            index,
            id: entry.id,
            label: entry.record.display_title().to_string(),
        })
    }

    /// Remove the record named by a confirmed delete request.
    pub fn confirm_delete(&mut self, request: &DeleteRequest) {
        let Some(index) = self.resolve(request.index, request.id) else {
            warn!("Record {:?} is already gone", request.id);
            self.push_notice(Notice::warning(
                "Delete not applied",
                format!("\"{}\" no longer exists.", request.label),
            ));
            return;
        };
        let removed = self.entries.remove(index);
        info!("Deleted item {} (\"{}\")", index, removed.record.title);

        self.selected = if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        };
        self.status_message = format!("Deleted \"{}\"", request.label);
        self.dirty = true;
    }

    /// Position of a record: the remembered index if the id still matches,
    /// otherwise wherever that id moved to.
    fn resolve(&self, index: usize, id: RecordId) -> Option<usize> {
        match self.entries.get(index) {
            Some(entry) if entry.id == id => Some(index),
            _ => self.entries.iter().position(|entry| entry.id == id),
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the collection through the store and report the outcome.
    pub fn save(&mut self) {
        let path = self.store.path().display().to_string();
        match self.store.save(self.records()) {
            Ok(()) => {
                self.dirty = false;
                self.status_message = format!(
                    "Saved {} items at {}",
                    self.entries.len(),
                    Local::now().format("%H:%M:%S")
                );
                self.push_notice(Notice::info("Saved", format!("Saved changes to {path}.")));
            }
            Err(e) => {
                warn!("{e}");
                self.status_message = "Save failed".to_string();
                self.push_notice(Notice::error("Save error", e.to_string()));
            }
        }
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn push_notice(&mut self, notice: Notice) {
        debug!("Notice: {:?}", notice);
        self.notices.push_back(notice);
    }

    /// The notification currently on screen, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }
}

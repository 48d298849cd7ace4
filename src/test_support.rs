//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::record::{FormInput, NewsRecord};
use crate::core::session::EditorSession;
use crate::core::store::Store;

/// Raw form content with the three list columns filled in.
pub fn form(date: &str, category: &str, title: &str) -> FormInput {
    FormInput {
        date: date.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

/// A record built the way the form builds it.
pub fn record(date: &str, category: &str, title: &str) -> NewsRecord {
    form(date, category, title).into_record()
}

/// A session over the given records. The store path is never written to.
pub fn session_with(records: Vec<NewsRecord>) -> EditorSession {
    let store = Store::new(std::env::temp_dir().join("newsdesk-unsaved-test.json"));
    EditorSession::new(store, records)
}

pub fn titles(session: &EditorSession) -> Vec<String> {
    session.records().map(|r| r.title.clone()).collect()
}

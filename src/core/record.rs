//! # News Records
//!
//! The one entity Newsdesk edits, plus the raw form content it is built from.
//!
//! ```text
//! FormInput ──into_record()──▶ NewsRecord
//!     ▲                            │
//!     └───────from_record()────────┘
//! ```
//!
//! Three fields of a record are derived and never typed by the user:
//!
//! - `datetime`: `date` with every `.` replaced by `-`
//! - `alt`: a copy of `title`
//! - `category_color`: a Tailwind class picked from `category`
//!
//! They are recomputed every time a record goes through the form. Records that
//! are only loaded and saved keep whatever the file had.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The category that gets the highlighted badge.
pub const NEW_MENU_CATEGORY: &str = "新メニュー";
pub const NEW_MENU_COLOR: &str = "bg-amber-800";
pub const DEFAULT_CATEGORY_COLOR: &str = "bg-stone-500";

/// Prefix prepended to bare image file names.
pub const IMAGE_DIR: &str = "./images/";

/// A single news item, serialized in the key order the website expects.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct NewsRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub datetime: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub alt: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub category_color: String,
    /// Keys this editor doesn't know about. Kept until the record is edited.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hand-edited files sometimes carry `null` where a string belongs.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `2025.09.30` → `2025-09-30`
pub fn derive_datetime(date: &str) -> String {
    date.replace('.', "-")
}

pub fn derive_category_color(category: &str) -> &'static str {
    if category == NEW_MENU_CATEGORY {
        NEW_MENU_COLOR
    } else {
        DEFAULT_CATEGORY_COLOR
    }
}

/// Blank input means "no image" and is stored as `null`, never `""`.
pub fn image_path(file_name: &str) -> Option<String> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        None
    } else {
        Some(format!("{IMAGE_DIR}{file_name}"))
    }
}

/// Final component of a stored image path, for showing in the form.
pub fn image_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

impl NewsRecord {
    /// Title for dialogs and prompts; empty titles get a placeholder.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// The raw text of the detail form's five fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub date: String,
    pub category: String,
    pub title: String,
    /// Bare file name, without the `./images/` prefix.
    pub image: String,
    pub content: String,
}

impl FormInput {
    /// Pre-fill the form from an existing record.
    pub fn from_record(record: &NewsRecord) -> Self {
        Self {
            date: record.date.clone(),
            category: record.category.clone(),
            title: record.title.clone(),
            image: record
                .image
                .as_deref()
                .map(image_file_name)
                .unwrap_or_default()
                .to_string(),
            content: record.content.clone(),
        }
    }

    /// Build a record, recomputing every derived field. Nothing is rejected.
    pub fn into_record(self) -> NewsRecord {
        NewsRecord {
            datetime: derive_datetime(&self.date),
            category_color: derive_category_color(&self.category).to_string(),
            alt: self.title.clone(),
            content: self.content.trim().to_string(),
            image: image_path(&self.image),
            date: self.date,
            category: self.category,
            title: self.title,
            extra: Map::new(),
        }
    }
}

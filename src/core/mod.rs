//! # Core Application Logic
//!
//! This module contains Newsdesk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Record (entity)      │
//!                    │  • Session (app data)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (news.json)    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: `NewsRecord` and the derivation rules applied by the form
//! - [`store`]: Reading and writing the JSON file
//! - [`session`]: `EditorSession`, the collection with its selection and notifications
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file + CLI resolution

pub mod action;
pub mod config;
pub mod record;
pub mod session;
pub mod store;

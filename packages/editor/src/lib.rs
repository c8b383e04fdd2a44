//! # Pagecraft Editor
//!
//! Command-based editing of a project with per-lane undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditSession: Editor + UiState               │
//! │  - selection, current page, drag, device    │
//! │  - reconciled after every edit              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Editor: sole owner of the Project           │
//! │  - validates and applies Commands           │
//! │  - one History per lane                     │
//! │  - version counter, Arc snapshots           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Project (pagecraft-model)                   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Editor, HistoryLane};
//!
//! let mut editor = Editor::new(Project::new("Plumber"), registry)?;
//! let hero = editor.insert_block("home", 0, "hero")?;
//! editor.move_block("home", 0, 0)?; // no-op, no history entry
//! editor.undo(&HistoryLane::Page("home".into()))?;
//! ```

mod commands;
mod editor;
mod errors;
mod history;
mod session;

pub use commands::{Command, GlobalSlot, HistoryLane};
pub use editor::Editor;
pub use errors::{CommandError, EditorError};
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_LIMIT};
pub use session::{EditSession, PreviewDevice, UiState};

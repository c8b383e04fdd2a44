//! # Pagecraft compiler
//!
//! Composes a page (global header, page blocks, global footer) into one
//! HTML/CSS/JS triple. Every block is wrapped in a container keyed on its
//! instance id, shared type styles are emitted once, and theme tokens are
//! exposed as CSS custom properties on `:root`.
//!
//! ```rust,ignore
//! use pagecraft_compiler::Composer;
//! use pagecraft_blocks::RenderMode;
//!
//! let composer = Composer::with_builtins();
//! let page = composer.compose_page(&project, "home", RenderMode::Preview)?;
//! let document = page.to_document(true);
//! ```

mod composer;
mod output;


pub use composer::{CompileError, Composer};
pub use output::{BlockDiagnostic, ComposedPage, DiagnosticKind};

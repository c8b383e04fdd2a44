//! # Pagecraft document model
//!
//! The persisted project: ordered pages of block instances, an optional
//! global header and footer, and a theme.
//!
//! ```text
//! Project
//!  ├── theme            (colour, font, spacing and radius tokens)
//!  ├── globalHeader?    (Block, rendered on every page)
//!  ├── pages[]
//!  │    └── blocks[]    (Block, literal render order)
//!  └── globalFooter?    (Block, rendered on every page)
//! ```
//!
//! Only the editor mutates a project, and only through commands. Everything
//! here is plain data plus read-only queries and invariant checks.

mod block;
mod error;
mod page;
mod project;
mod theme;

#[cfg(test)]
mod tests_project;

pub use block::{Block, Props};
pub use error::ModelError;
pub use page::{slugify, Page, PageMeta, HOME_SLUG};
pub use project::{BlockLocation, Project};
pub use theme::{ColorRole, FontRole, Theme, ThemeColors, Typography};

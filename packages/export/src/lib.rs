//! # Pagecraft export
//!
//! Turns a project into a static site. Every page becomes a directory
//! holding `index.html`, `styles.css` and (when the page has behaviour)
//! `app.js`; the home page lives at the bundle root.
//!
//! Files are handed to a [`FileSink`], so the same bundle can be written to
//! disk, kept in memory for tests, or shipped elsewhere.

mod adapter;
mod sink;

pub use adapter::{EmittedFile, ExportAdapter, ExportError, ExportOptions, SiteBundle};
pub use sink::{emit, DirectorySink, FileSink, MemorySink};

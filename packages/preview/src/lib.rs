//! # Pagecraft preview
//!
//! Live preview of the page being edited. Document changes are debounced,
//! composed off the async runtime, and published as self-contained HTML
//! frames meant for a sandboxed iframe.
//!
//! ```rust,ignore
//! let (handle, mut frames) = PreviewAdapter::spawn(composer, PreviewConfig::default());
//! handle.document_changed(editor.snapshot())?;
//! frames.changed().await?;
//! let iframe = frames.borrow().as_ref().map(PreviewFrame::iframe);
//! ```

mod adapter;
mod frame;

pub use adapter::{PreviewAdapter, PreviewConfig, PreviewError, PreviewHandle};
pub use frame::PreviewFrame;

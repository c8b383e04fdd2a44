//! # Pagecraft blocks
//!
//! The renderer contract every block type satisfies, the declarative prop
//! schemas used to validate block data, the registry that maps a type id to
//! its renderer, and the built-in block set.
//!
//! ```rust,ignore
//! use pagecraft_blocks::{BlockRegistry, RenderContext, RenderMode};
//!
//! let registry = BlockRegistry::with_builtins();
//! let hero = registry.lookup("hero").expect("built in");
//! let props = hero.default_props();
//! let ctx = RenderContext::new(&theme, RenderMode::Preview, "hero-1", "hero");
//! let fragment = hero.render(&props, &ctx)?;
//! ```

mod context;
mod contract;
mod registry;
pub mod renderers;
mod schema;

pub use context::{RenderContext, RenderMode};
pub use contract::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, RenderError, RenderFragment,
};
pub use registry::{BlockRegistry, RegistryError};
pub use schema::{salvage, PropKind, PropSchema, PropSpec, PropsExt, Validation, ValidationIssue};

//! Stateless helpers shared by block renderers and the composition engine.
//!
//! Renderers never inherit behaviour; they call these functions through the
//! render context.

pub mod color;
pub mod css;
pub mod html;
pub mod id;

pub use color::{contrast_ratio, parse_color, readable_text_on, Rgb};
pub use css::{instance_anchor, instance_selector, sanitize_css_value, scope_ident, type_class};
pub use html::{escape_attr, escape_html};
pub use id::fresh_id;

//! Built-in block types.
//!
//! Each renderer keeps its shared rules in `base_css` (keyed on type classes
//! such as `.hero__title`) and emits only instance-scoped rules from
//! `render` (keyed on `ctx.own(root)`, which never reaches nested children).

mod content;
mod cta;
mod faq;
mod footer;
mod header;
mod hero;
mod services;

pub use content::ContentRenderer;
pub use cta::CtaRenderer;
pub use faq::FaqRenderer;
pub use footer::FooterRenderer;
pub use header::HeaderRenderer;
pub use hero::HeroRenderer;
pub use services::ServicesRenderer;

use crate::BlockRenderer;
use std::sync::Arc;

pub(crate) fn builtins() -> Vec<Arc<dyn BlockRenderer>> {
    vec![
        Arc::new(HeaderRenderer),
        Arc::new(HeroRenderer),
        Arc::new(ServicesRenderer),
        Arc::new(ContentRenderer),
        Arc::new(FaqRenderer),
        Arc::new(CtaRenderer),
        Arc::new(FooterRenderer),
    ]
}

/// Map a background choice to `(background, foreground)` theme references.
pub(crate) fn tone(choice: &str) -> (String, String) {
    use pagecraft_model::ColorRole;

    match choice {
        "primary" => (ColorRole::Primary.var(), ColorRole::Primary.contrast_var()),
        "secondary" => (ColorRole::Secondary.var(), ColorRole::Secondary.contrast_var()),
        "accent" => (ColorRole::Accent.var(), ColorRole::Accent.contrast_var()),
        "gradient" => (
            format!(
                "linear-gradient(135deg, {}, {})",
                ColorRole::Primary.var(),
                ColorRole::Secondary.var()
            ),
            ColorRole::Primary.contrast_var(),
        ),
        "surface" => (ColorRole::Surface.var(), ColorRole::Text.var()),
        _ => (ColorRole::Background.var(), ColorRole::Text.var()),
    }
}

use super::tone;
use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::json;

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("title", 160).required(),
    PropSpec::text("subtitle", 400),
    PropSpec::text("buttonLabel", 40),
    PropSpec::url("buttonHref"),
    PropSpec::text("phone", 40),
    PropSpec::choice("background", &["primary", "secondary", "accent", "gradient", "surface"]),
]);

const BASE_CSS: &str = r#".cta { padding: var(--space-section) var(--space-sm); text-align: center; }
.cta__inner { max-width: 760px; margin: 0 auto; }
.cta__title { margin: 0 0 var(--space-sm); font-family: var(--font-heading); font-size: clamp(2rem, 4vw, 2.75rem); }
.cta__subtitle { margin: 0 0 var(--space-lg); font-size: 1.125rem; opacity: 0.9; }
.cta__actions { display: flex; flex-wrap: wrap; justify-content: center; gap: var(--space-sm); }
.cta__button { display: inline-block; padding: 0.875rem 1.75rem; border-radius: var(--radius-md); background: var(--color-background); color: var(--color-text); font-weight: 600; text-decoration: none; }
.cta__phone { display: inline-block; padding: 0.875rem 1.75rem; border: 2px solid currentColor; border-radius: var(--radius-md); color: inherit; font-weight: 600; text-decoration: none; }"#;

/// Conversion banner with a button and an optional phone link.
pub struct CtaRenderer;

impl BlockRenderer for CtaRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "cta",
            name: "Call to action",
            category: BlockCategory::Conversion,
            description: "Banner asking visitors to get in touch",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "title": "Ready to start your project?",
            "subtitle": "Tell us what you need and get a quote within 24 hours.",
            "buttonLabel": "Contact us",
            "buttonHref": "#contact",
            "phone": "",
            "background": "primary"
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let title = props.text("title");
        if title.is_empty() {
            return Err(RenderError::MissingProp("title".to_string()));
        }

        let mut html = String::from("<section class=\"cta\">\n  <div class=\"cta__inner\">\n");
        html.push_str(&format!("    <h2 class=\"cta__title\">{}</h2>\n", ctx.escape(title)));

        let subtitle = props.text("subtitle");
        if !subtitle.is_empty() {
            html.push_str(&format!("    <p class=\"cta__subtitle\">{}</p>\n", ctx.escape(subtitle)));
        }

        let label = props.text("buttonLabel");
        let phone = props.text("phone");
        if !label.is_empty() || !phone.is_empty() {
            html.push_str("    <div class=\"cta__actions\">\n");
            if !label.is_empty() {
                html.push_str(&format!(
                    "      <a class=\"cta__button\" href=\"{}\">{}</a>\n",
                    ctx.attr(props.text("buttonHref")),
                    ctx.escape(label)
                ));
            }
            if !phone.is_empty() {
                let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
                html.push_str(&format!(
                    "      <a class=\"cta__phone\" href=\"tel:{}\">{}</a>\n",
                    dial,
                    ctx.escape(phone)
                ));
            }
            html.push_str("    </div>\n");
        }
        html.push_str("  </div>\n</section>");

        let (background, foreground) = tone(props.text("background"));
        let css = format!(
            "{} {{ background: {}; color: {}; }}\n",
            ctx.own(".cta"),
            background,
            foreground
        );

        Ok(RenderFragment::new(ctx.block_id()).html(html).css(css))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderMode;
    use pagecraft_model::Theme;

    #[test]
    fn test_phone_link_keeps_only_dialable_characters() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "cta-1", "cta");
        let mut props = CtaRenderer.default_props();
        props.insert("phone".to_string(), json!("+33 1 23 45 67 89"));

        let fragment = CtaRenderer.render(&props, &ctx).unwrap();
        assert!(fragment.html.contains("href=\"tel:+33123456789\""));
        assert!(fragment.html.contains(">+33 1 23 45 67 89</a>"));
    }

    #[test]
    fn test_background_uses_contrast_token() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "cta-1", "cta");
        let fragment = CtaRenderer.render(&CtaRenderer.default_props(), &ctx).unwrap();
        assert_eq!(
            fragment.css,
            "#pc-cta-1 > .cta { background: var(--color-primary); color: var(--color-primary-contrast); }\n"
        );
    }
}

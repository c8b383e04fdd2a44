use super::tone;
use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::json;

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("eyebrow", 80),
    PropSpec::text("title", 160).required(),
    PropSpec::text("subtitle", 400),
    PropSpec::choice("layout", &["center", "left", "split"]),
    PropSpec::choice("height", &["small", "medium", "large"]),
    PropSpec::choice("background", &["default", "surface", "primary", "gradient"]),
    PropSpec::url("image"),
    PropSpec::text("imageAlt", 160),
    PropSpec::text("primaryLabel", 40),
    PropSpec::url("primaryHref"),
    PropSpec::text("secondaryLabel", 40),
    PropSpec::url("secondaryHref"),
]);

const BASE_CSS: &str = r#".hero { position: relative; display: flex; align-items: center; overflow: hidden; }
.hero__inner { width: 100%; max-width: 1200px; margin: 0 auto; padding: var(--space-2xl) var(--space-sm); }
.hero__content { max-width: 800px; }
.hero--center .hero__content { margin: 0 auto; text-align: center; }
.hero--center .hero__actions { justify-content: center; }
.hero--split .hero__inner { display: grid; grid-template-columns: 1fr 1fr; gap: var(--space-2xl); align-items: center; }
.hero__eyebrow { display: inline-block; margin-bottom: var(--space-sm); font-size: 0.875rem; font-weight: 600; letter-spacing: 0.1em; text-transform: uppercase; opacity: 0.8; }
.hero__title { margin: 0 0 var(--space-md); font-family: var(--font-heading); font-size: clamp(2.5rem, 5vw, 4rem); line-height: 1.1; }
.hero__subtitle { margin: 0 0 var(--space-lg); font-size: 1.25rem; line-height: 1.6; opacity: 0.9; }
.hero__actions { display: flex; flex-wrap: wrap; gap: var(--space-sm); }
.hero__button { display: inline-block; padding: 0.875rem 1.75rem; border-radius: var(--radius-md); font-weight: 600; text-decoration: none; }
.hero__button--primary { background: var(--color-accent); color: var(--color-accent-contrast); }
.hero__button--secondary { border: 2px solid currentColor; color: inherit; }
.hero__media img { width: 100%; height: auto; border-radius: var(--radius-lg); }
@media (max-width: 768px) { .hero--split .hero__inner { grid-template-columns: 1fr; } }"#;

/// Full-width opening section with a headline, subtitle and up to two actions.
pub struct HeroRenderer;

impl BlockRenderer for HeroRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "hero",
            name: "Hero",
            category: BlockCategory::Hero,
            description: "Headline section with call-to-action buttons",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "eyebrow": "",
            "title": "Your trusted local experts",
            "subtitle": "Fast, reliable service with a satisfaction guarantee.",
            "layout": "center",
            "height": "medium",
            "background": "gradient",
            "image": "",
            "imageAlt": "",
            "primaryLabel": "Get a free quote",
            "primaryHref": "#contact",
            "secondaryLabel": "",
            "secondaryHref": ""
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

        let layout = props.text("layout");
        let mut html = format!("<section class=\"hero hero--{}\">\n", ctx.attr(layout));
        html.push_str("  <div class=\"hero__inner\">\n    <div class=\"hero__content\">\n");

        let eyebrow = props.text("eyebrow");
        if !eyebrow.is_empty() {
            html.push_str(&format!(
                "      <span class=\"hero__eyebrow\">{}</span>\n",
                ctx.escape(eyebrow)
            ));
        }
        html.push_str(&format!(
            "      <h1 class=\"hero__title\" id=\"{}\">{}</h1>\n",
            ctx.anchor("title"),
            ctx.escape(title)
        ));

        let subtitle = props.text("subtitle");
        if !subtitle.is_empty() {
            html.push_str(&format!(
                "      <p class=\"hero__subtitle\">{}</p>\n",
                ctx.escape(subtitle)
            ));
        }

        let actions: Vec<String> = [("primary", "primaryLabel", "primaryHref"), ("secondary", "secondaryLabel", "secondaryHref")]
            .iter()
            .filter(|(_, label, _)| !props.text(label).is_empty())
            .map(|(kind, label, href)| {
                format!(
                    "        <a class=\"hero__button hero__button--{}\" href=\"{}\">{}</a>\n",
                    kind,
                    ctx.attr(props.text(href)),
                    ctx.escape(props.text(label))
                )
            })
            .collect();
        if !actions.is_empty() {
            html.push_str("      <div class=\"hero__actions\">\n");
            html.push_str(&actions.concat());
            html.push_str("      </div>\n");
        }
        html.push_str("    </div>\n");

        let image = props.text("image");
        if !image.is_empty() {
            html.push_str(&format!(
                "    <div class=\"hero__media\"><img src=\"{}\" alt=\"{}\"></div>\n",
                ctx.asset(image),
                ctx.attr(props.text("imageAlt"))
            ));
        }
        html.push_str("  </div>\n</section>");

        let (background, foreground) = tone(props.text("background"));
        let min_height = match props.text("height") {
            "small" => "50vh",
            "large" => "100vh",
            _ => "70vh",
        };
        let css = format!(
            "{root} {{ min-height: {min_height}; background: {background}; color: {foreground}; }}\n",
            root = ctx.own(".hero"),
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
    fn test_render_defaults() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "a", "hero");
        let fragment = HeroRenderer.render(&HeroRenderer.default_props(), &ctx).unwrap();

        assert_eq!(fragment.block_id, "a");
        assert!(fragment.html.contains("Your trusted local experts"));
        assert!(fragment.html.contains("hero__button--primary"));
        assert!(!fragment.html.contains("hero__button--secondary"));
        assert!(fragment.css.starts_with("#pc-a > .hero {"));
        assert!(fragment.css.contains("var(--color-primary)"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "a", "hero");
        let mut props = HeroRenderer.default_props();
        props.insert("title".to_string(), json!("<script>alert(1)</script>"));

        let fragment = HeroRenderer.render(&props, &ctx).unwrap();
        assert!(!fragment.html.contains("<script>"));
        assert!(fragment.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_title_is_a_render_fault() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "a", "hero");
        let mut props = HeroRenderer.default_props();
        props.insert("title".to_string(), json!(""));
        assert_eq!(
            HeroRenderer.render(&props, &ctx),
            Err(RenderError::MissingProp("title".to_string()))
        );
    }

    #[test]
    fn test_css_never_embeds_literal_theme_colors() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "a", "hero");
        let fragment = HeroRenderer.render(&HeroRenderer.default_props(), &ctx).unwrap();
        assert!(!fragment.css.contains(&theme.colors.primary));
        assert!(!BASE_CSS.contains("hsl("));
    }
}

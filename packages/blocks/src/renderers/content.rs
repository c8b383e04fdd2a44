use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::json;

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("title", 160),
    PropSpec::text("body", 4000),
    PropSpec::url("image"),
    PropSpec::text("imageAlt", 160),
    PropSpec::choice("imagePosition", &["left", "right"]),
    PropSpec::number("maxWidth", 480.0, 1600.0),
]);

const BASE_CSS: &str = r#".content { padding: var(--space-section) var(--space-sm); background: var(--color-background); color: var(--color-text); }
.content__inner { margin: 0 auto; display: grid; gap: var(--space-xl); align-items: center; }
.content__inner--media { grid-template-columns: 1fr 1fr; }
.content__title { margin: 0 0 var(--space-md); font-family: var(--font-heading); font-size: clamp(1.75rem, 3vw, 2.5rem); }
.content__body p { margin: 0 0 var(--space-sm); font-family: var(--font-body); line-height: 1.7; }
.content__media img { width: 100%; height: auto; border-radius: var(--radius-lg); }
@media (max-width: 768px) { .content__inner--media { grid-template-columns: 1fr; } }"#;

/// Text section with an optional image beside it. Blank lines in `body`
/// separate paragraphs.
pub struct ContentRenderer;

impl BlockRenderer for ContentRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "content",
            name: "Text & image",
            category: BlockCategory::Content,
            description: "Paragraphs of text with an optional side image",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "title": "About us",
            "body": "Family-run since 1998.\n\nWe answer every call within the hour.",
            "image": "",
            "imageAlt": "",
            "imagePosition": "right",
            "maxWidth": 1100
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let image = props.text("image");
        let has_media = !image.is_empty();

        let mut text = String::from("    <div class=\"content__text\">\n");
        let title = props.text("title");
        if !title.is_empty() {
            text.push_str(&format!(
                "      <h2 class=\"content__title\">{}</h2>\n",
                ctx.escape(title)
            ));
        }
        text.push_str("      <div class=\"content__body\">\n");
        for paragraph in props.text("body").split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            text.push_str(&format!("        <p>{}</p>\n", ctx.escape(paragraph)));
        }
        text.push_str("      </div>\n    </div>\n");

        let media = if has_media {
            format!(
                "    <figure class=\"content__media\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></figure>\n",
                ctx.asset(image),
                ctx.attr(props.text("imageAlt"))
            )
        } else {
            String::new()
        };

        let (first, second) = if props.text("imagePosition") == "left" {
            (media, text)
        } else {
            (text, media)
        };

        let modifier = if has_media { " content__inner--media" } else { "" };
        let html = format!(
            "<section class=\"content\">\n  <div class=\"content__inner{}\">\n{}{}  </div>\n</section>",
            modifier, first, second
        );

        let css = format!(
            "{} .content__inner {{ max-width: {}px; }}\n",
            ctx.own(".content"),
            props.number("maxWidth").round() as u32
        );

        Ok(RenderFragment::new(ctx.block_id()).html(html).css(css))
    }
}

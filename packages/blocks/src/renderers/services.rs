use super::tone;
use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::{json, Value};

const SERVICE: &[PropSpec] = &[
    PropSpec::text("title", 80).required(),
    PropSpec::text("description", 400),
    PropSpec::text("icon", 8),
    PropSpec::text("price", 40),
    PropSpec::url("href"),
];

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("title", 120),
    PropSpec::text("subtitle", 300),
    PropSpec::number("columns", 1.0, 4.0),
    PropSpec::choice("background", &["default", "surface", "primary"]),
    PropSpec::list("services", SERVICE, 12),
]);

const BASE_CSS: &str = r#".services { padding: var(--space-section) var(--space-sm); }
.services__inner { max-width: 1200px; margin: 0 auto; }
.services__header { max-width: 720px; margin: 0 auto var(--space-xl); text-align: center; }
.services__title { margin: 0 0 var(--space-sm); font-family: var(--font-heading); font-size: clamp(2rem, 4vw, 2.75rem); }
.services__subtitle { margin: 0; color: var(--color-text-muted); }
.services__grid { display: grid; gap: var(--space-lg); }
.services__card { padding: var(--space-lg); border: 1px solid var(--color-border); border-radius: var(--radius-lg); background: var(--color-background); color: var(--color-text); }
.services__icon { display: block; margin-bottom: var(--space-sm); font-size: 2rem; }
.services__card-title { margin: 0 0 var(--space-xs); font-family: var(--font-heading); font-size: 1.25rem; }
.services__price { display: block; margin-top: var(--space-sm); font-weight: 700; color: var(--color-primary); }
.services__link { color: var(--color-primary); font-weight: 600; }
@media (max-width: 768px) { .services__grid { grid-template-columns: 1fr !important; } }"#;

/// Grid of service cards.
pub struct ServicesRenderer;

impl BlockRenderer for ServicesRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "services",
            name: "Services",
            category: BlockCategory::Services,
            description: "Grid of service cards with optional prices",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "title": "Our services",
            "subtitle": "Everything you need, handled by certified professionals.",
            "columns": 3,
            "background": "surface",
            "services": [
                { "title": "Installation", "description": "New installations to current standards.", "icon": "🔧", "price": "", "href": "" },
                { "title": "Repairs", "description": "Fast diagnosis and lasting repairs.", "icon": "🛠", "price": "", "href": "" },
                { "title": "Maintenance", "description": "Yearly check-ups that prevent breakdowns.", "icon": "✅", "price": "", "href": "" }
            ]
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let mut html = String::from("<section class=\"services\">\n  <div class=\"services__inner\">\n");

        let title = props.text("title");
        let subtitle = props.text("subtitle");
        if !title.is_empty() || !subtitle.is_empty() {
            html.push_str("    <header class=\"services__header\">\n");
            if !title.is_empty() {
                html.push_str(&format!(
                    "      <h2 class=\"services__title\">{}</h2>\n",
                    ctx.escape(title)
                ));
            }
            if !subtitle.is_empty() {
                html.push_str(&format!(
                    "      <p class=\"services__subtitle\">{}</p>\n",
                    ctx.escape(subtitle)
                ));
            }
            html.push_str("    </header>\n");
        }

        html.push_str("    <div class=\"services__grid\">\n");
        for service in props.items("services") {
            html.push_str(&render_card(service, ctx));
        }
        html.push_str("    </div>\n  </div>\n</section>");

        let columns = props.number("columns").clamp(1.0, 4.0) as u32;
        let (background, foreground) = tone(props.text("background"));
        let css = format!(
            "{root} {{ background: {background}; color: {foreground}; }}\n\
             {root} .services__grid {{ grid-template-columns: repeat({columns}, minmax(0, 1fr)); }}\n",
            root = ctx.own(".services"),
        );

        Ok(RenderFragment::new(ctx.block_id()).html(html).css(css))
    }
}

fn render_card(service: &Value, ctx: &RenderContext) -> String {
    let field = |key: &str| service.get(key).and_then(Value::as_str).unwrap_or("");

    let mut card = String::from("      <article class=\"services__card\">\n");
    if !field("icon").is_empty() {
        card.push_str(&format!(
            "        <span class=\"services__icon\" aria-hidden=\"true\">{}</span>\n",
            ctx.escape(field("icon"))
        ));
    }
    card.push_str(&format!(
        "        <h3 class=\"services__card-title\">{}</h3>\n",
        ctx.escape(field("title"))
    ));
    if !field("description").is_empty() {
        card.push_str(&format!("        <p>{}</p>\n", ctx.escape(field("description"))));
    }
    if !field("price").is_empty() {
        card.push_str(&format!(
            "        <span class=\"services__price\">{}</span>\n",
            ctx.escape(field("price"))
        ));
    }
    if !field("href").is_empty() {
        card.push_str(&format!(
            "        <a class=\"services__link\" href=\"{}\">Learn more</a>\n",
            ctx.attr(field("href"))
        ));
    }
    card.push_str("      </article>\n");
    card
}

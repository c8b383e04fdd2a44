use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::{json, Value};

const LINK: &[PropSpec] = &[
    PropSpec::text("label", 60).required(),
    PropSpec::url("href"),
];

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("businessName", 80),
    PropSpec::text("tagline", 200),
    PropSpec::text("address", 200),
    PropSpec::text("phone", 40),
    PropSpec::text("email", 120),
    PropSpec::list("links", LINK, 12),
    PropSpec::text("copyright", 160),
]);

const BASE_CSS: &str = r#".footer { padding: var(--space-2xl) var(--space-sm) var(--space-lg); background: var(--color-secondary); color: var(--color-secondary-contrast); }
.footer__inner { max-width: 1200px; margin: 0 auto; display: grid; grid-template-columns: 2fr 1fr 1fr; gap: var(--space-xl); }
.footer__name { margin: 0 0 var(--space-xs); font-family: var(--font-heading); font-size: 1.25rem; }
.footer__tagline { margin: 0; opacity: 0.8; }
.footer__contact { font-style: normal; line-height: 1.8; }
.footer a { color: inherit; }
.footer__links { margin: 0; padding: 0; list-style: none; line-height: 1.8; }
.footer__bottom { max-width: 1200px; margin: var(--space-xl) auto 0; padding-top: var(--space-md); border-top: 1px solid currentColor; font-size: 0.875rem; opacity: 0.7; }
@media (max-width: 768px) { .footer__inner { grid-template-columns: 1fr; } }"#;

/// Site footer with contact details, links and a copyright line.
pub struct FooterRenderer;

impl BlockRenderer for FooterRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "footer",
            name: "Footer",
            category: BlockCategory::Layout,
            description: "Contact details, links and legal line",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "businessName": "My Business",
            "tagline": "Quality work, honest prices.",
            "address": "",
            "phone": "",
            "email": "",
            "links": [
                { "label": "Legal notice", "href": "/legal" }
            ],
            "copyright": ""
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let name = props.text("businessName");
        let mut html = String::from("<footer class=\"footer\">\n  <div class=\"footer__inner\">\n    <div>\n");
        if !name.is_empty() {
            html.push_str(&format!("      <p class=\"footer__name\">{}</p>\n", ctx.escape(name)));
        }
        let tagline = props.text("tagline");
        if !tagline.is_empty() {
            html.push_str(&format!("      <p class=\"footer__tagline\">{}</p>\n", ctx.escape(tagline)));
        }
        html.push_str("    </div>\n");

        html.push_str("    <address class=\"footer__contact\">\n");
        let address = props.text("address");
        if !address.is_empty() {
            html.push_str(&format!("      <div>{}</div>\n", ctx.escape(address)));
        }
        let phone = props.text("phone");
        if !phone.is_empty() {
            let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
            html.push_str(&format!("      <div><a href=\"tel:{}\">{}</a></div>\n", dial, ctx.escape(phone)));
        }
        let email = props.text("email");
        if !email.is_empty() {
            html.push_str(&format!(
                "      <div><a href=\"mailto:{}\">{}</a></div>\n",
                ctx.attr(email),
                ctx.escape(email)
            ));
        }
        html.push_str("    </address>\n");

        html.push_str("    <ul class=\"footer__links\">\n");
        for link in props.items("links") {
            let field = |key: &str| link.get(key).and_then(Value::as_str).unwrap_or("");
            html.push_str(&format!(
                "      <li><a href=\"{}\">{}</a></li>\n",
                ctx.attr(field("href")),
                ctx.escape(field("label"))
            ));
        }
        html.push_str("    </ul>\n  </div>\n");

        // Blank copyright falls back to the business name.
        let copyright = match props.text("copyright") {
            "" if name.is_empty() => String::new(),
            "" => format!("© {}", name),
            text => text.to_string(),
        };
        if !copyright.is_empty() {
            html.push_str(&format!("  <div class=\"footer__bottom\">{}</div>\n", ctx.escape(&copyright)));
        }
        html.push_str("</footer>");

        Ok(RenderFragment::new(ctx.block_id()).html(html))
    }
}

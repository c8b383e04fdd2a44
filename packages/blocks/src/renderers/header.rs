use super::tone;
use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::{json, Value};

const LINK: &[PropSpec] = &[
    PropSpec::text("label", 40).required(),
    PropSpec::url("href"),
];

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("logoText", 60),
    PropSpec::url("logoImage"),
    PropSpec::list("links", LINK, 8),
    PropSpec::text("ctaLabel", 40),
    PropSpec::url("ctaHref"),
    PropSpec::flag("sticky"),
    PropSpec::choice("background", &["default", "surface", "primary"]),
]);

const BASE_CSS: &str = r#".header { z-index: 50; border-bottom: 1px solid var(--color-border); }
.header__inner { max-width: 1200px; margin: 0 auto; padding: var(--space-sm); display: flex; align-items: center; justify-content: space-between; gap: var(--space-md); }
.header__logo { display: flex; align-items: center; gap: var(--space-xs); font-family: var(--font-heading); font-size: 1.25rem; font-weight: 700; color: inherit; text-decoration: none; }
.header__logo img { height: 40px; width: auto; }
.header__nav { display: flex; align-items: center; gap: var(--space-md); }
.header__link { color: inherit; text-decoration: none; font-weight: 500; }
.header__link:hover { color: var(--color-primary); }
.header__cta { padding: 0.625rem 1.25rem; border-radius: var(--radius-md); background: var(--color-accent); color: var(--color-accent-contrast); font-weight: 600; text-decoration: none; }
.header__toggle { display: none; border: 0; background: none; color: inherit; font-size: 1.5rem; cursor: pointer; }
@media (max-width: 768px) {
  .header__toggle { display: block; }
  .header__nav { display: none; position: absolute; top: 100%; left: 0; right: 0; flex-direction: column; padding: var(--space-md); background: inherit; }
  .header__nav--open { display: flex; }
}"#;

/// Site header with logo, navigation links and a mobile menu toggle.
pub struct HeaderRenderer;

impl BlockRenderer for HeaderRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "header",
            name: "Header",
            category: BlockCategory::Layout,
            description: "Logo, navigation and call-to-action bar",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "logoText": "My Business",
            "logoImage": "",
            "links": [
                { "label": "Home", "href": "/" },
                { "label": "Services", "href": "#services" },
                { "label": "Contact", "href": "#contact" }
            ],
            "ctaLabel": "Call us",
            "ctaHref": "tel:+10000000000",
            "sticky": true,
            "background": "default"
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let menu_id = ctx.anchor("menu");
        let mut html = String::from("<header class=\"header\">\n  <div class=\"header__inner\">\n");

        html.push_str("    <a class=\"header__logo\" href=\"/\">");
        let logo_image = props.text("logoImage");
        if !logo_image.is_empty() {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                ctx.asset(logo_image),
                ctx.attr(props.text("logoText"))
            ));
        }
        html.push_str(&format!("<span>{}</span></a>\n", ctx.escape(props.text("logoText"))));

        html.push_str(&format!(
            "    <button class=\"header__toggle\" type=\"button\" aria-controls=\"{}\" aria-expanded=\"false\" aria-label=\"Menu\">&#9776;</button>\n",
            menu_id
        ));
        html.push_str(&format!("    <nav class=\"header__nav\" id=\"{}\">\n", menu_id));
        for link in props.items("links") {
            let field = |key: &str| link.get(key).and_then(Value::as_str).unwrap_or("");
            html.push_str(&format!(
                "      <a class=\"header__link\" href=\"{}\">{}</a>\n",
                ctx.attr(field("href")),
                ctx.escape(field("label"))
            ));
        }
        let cta_label = props.text("ctaLabel");
        if !cta_label.is_empty() {
            html.push_str(&format!(
                "      <a class=\"header__cta\" href=\"{}\">{}</a>\n",
                ctx.attr(props.text("ctaHref")),
                ctx.escape(cta_label)
            ));
        }
        html.push_str("    </nav>\n  </div>\n</header>");

        let (background, foreground) = tone(props.text("background"));
        let position = if props.flag("sticky") {
            "position: sticky; top: 0;"
        } else {
            "position: relative;"
        };
        let css = format!(
            "{scope} {{ {position} z-index: 50; }}\n{root} {{ background: {background}; color: {foreground}; }}\n",
            scope = ctx.scope(),
            root = ctx.own(".header"),
        );

        let js = format!(
            "var toggle = document.querySelector({toggle});\n\
             var menu = document.getElementById({menu});\n\
             if (toggle && menu) {{\n  \
               toggle.addEventListener('click', function () {{\n    \
                 var open = menu.classList.toggle('header__nav--open');\n    \
                 toggle.setAttribute('aria-expanded', String(open));\n  \
               }});\n\
             }}\n",
            toggle = Value::from(format!("{} .header__toggle", ctx.own(".header"))),
            menu = Value::from(menu_id.as_str()),
        );

        Ok(RenderFragment::new(ctx.block_id()).html(html).css(css).js(js))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderMode;
    use pagecraft_model::Theme;

    #[test]
    fn test_menu_toggle_is_keyed_on_instance() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "h1", "header");
        let fragment = HeaderRenderer.render(&HeaderRenderer.default_props(), &ctx).unwrap();

        assert!(fragment.html.contains("id=\"pc-h1-menu\""));
        assert!(fragment.js.contains("\"#pc-h1 > .header .header__toggle\""));
        assert!(fragment.js.contains("getElementById(\"pc-h1-menu\")"));
        assert_eq!(fragment.html.matches("header__link\"").count(), 3);
    }

    #[test]
    fn test_sticky_flag_controls_position() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "h1", "header");
        let sticky = HeaderRenderer.render(&HeaderRenderer.default_props(), &ctx).unwrap();
        assert!(sticky.css.contains("position: sticky"));

        let mut props = HeaderRenderer.default_props();
        props.insert("sticky".to_string(), json!(false));
        let flat = HeaderRenderer.render(&props, &ctx).unwrap();
        assert!(!flat.css.contains("position: sticky"));
    }

    #[test]
    fn test_logo_image_goes_through_asset_addressing() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Export, "h1", "header").with_asset_prefix("../");
        let mut props = HeaderRenderer.default_props();
        props.insert("logoImage".to_string(), json!("/media/logo.png"));

        let fragment = HeaderRenderer.render(&props, &ctx).unwrap();
        assert!(fragment.html.contains("src=\"../media/logo.png\""));
    }
}

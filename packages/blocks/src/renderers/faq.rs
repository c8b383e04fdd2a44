use crate::{
    props_from, BlockCategory, BlockMetadata, BlockRenderer, PropSchema, PropSpec, PropsExt,
    RenderContext, RenderError, RenderFragment,
};
use pagecraft_model::Props;
use serde_json::{json, Value};

const QUESTION: &[PropSpec] = &[
    PropSpec::text("question", 200).required(),
    PropSpec::text("answer", 2000),
];

const SCHEMA: PropSchema = PropSchema::new(&[
    PropSpec::text("title", 120),
    PropSpec::flag("singleOpen"),
    PropSpec::list("items", QUESTION, 30),
]);

const BASE_CSS: &str = r#".faq { padding: var(--space-section) var(--space-sm); background: var(--color-background); color: var(--color-text); }
.faq__inner { max-width: 800px; margin: 0 auto; }
.faq__title { margin: 0 0 var(--space-xl); font-family: var(--font-heading); text-align: center; }
.faq__item { border-bottom: 1px solid var(--color-border); }
.faq__question { width: 100%; padding: var(--space-md) 0; border: 0; background: none; color: inherit; font: inherit; font-weight: 600; text-align: left; cursor: pointer; }
.faq__answer { padding: 0 0 var(--space-md); color: var(--color-text-muted); line-height: 1.7; }
.faq__answer[hidden] { display: none; }"#;

/// Accordion of questions and answers.
pub struct FaqRenderer;

impl BlockRenderer for FaqRenderer {
    fn metadata(&self) -> BlockMetadata {
        BlockMetadata {
            block_type: "faq",
            name: "FAQ",
            category: BlockCategory::Content,
            description: "Frequently asked questions as an accordion",
        }
    }

    fn schema(&self) -> &'static PropSchema {
        &SCHEMA
    }

    fn default_props(&self) -> Props {
        props_from(json!({
            "title": "Frequently asked questions",
            "singleOpen": true,
            "items": [
                { "question": "Do you offer free quotes?", "answer": "Yes, every quote is free and without obligation." },
                { "question": "Which areas do you cover?", "answer": "We work within 30 km of our workshop." }
            ]
        }))
    }

    fn base_css(&self) -> &'static str {
        BASE_CSS
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError> {
        let mut html = String::from("<section class=\"faq\">\n  <div class=\"faq__inner\">\n");

        let title = props.text("title");
        if !title.is_empty() {
            html.push_str(&format!("    <h2 class=\"faq__title\">{}</h2>\n", ctx.escape(title)));
        }

        for (index, item) in props.items("items").iter().enumerate() {
            let field = |key: &str| item.get(key).and_then(Value::as_str).unwrap_or("");
            let answer_id = ctx.anchor(&format!("answer-{}", index));
            html.push_str(&format!(
                "    <div class=\"faq__item\">\n      \
                 <button class=\"faq__question\" type=\"button\" aria-expanded=\"false\" aria-controls=\"{id}\">{q}</button>\n      \
                 <div class=\"faq__answer\" id=\"{id}\" hidden>{a}</div>\n    \
                 </div>\n",
                id = answer_id,
                q = ctx.escape(field("question")),
                a = ctx.escape(field("answer")),
            ));
        }
        html.push_str("  </div>\n</section>");

        let css = format!("{} .faq__question:hover {{ color: var(--color-primary); }}\n", ctx.own(".faq"));

        // Only this instance's buttons; nested FAQ blocks bind their own.
        let js = format!(
            "var buttons = document.querySelectorAll({buttons});\n\
             var single = {single};\n\
             buttons.forEach(function (button) {{\n  \
               button.addEventListener('click', function () {{\n    \
                 var open = button.getAttribute('aria-expanded') === 'true';\n    \
                 if (single) {{\n      \
                   buttons.forEach(function (other) {{\n        \
                     other.setAttribute('aria-expanded', 'false');\n        \
                     document.getElementById(other.getAttribute('aria-controls')).hidden = true;\n      \
                   }});\n    \
                 }}\n    \
                 button.setAttribute('aria-expanded', String(!open));\n    \
                 document.getElementById(button.getAttribute('aria-controls')).hidden = open;\n  \
               }});\n\
             }});\n",
            buttons = Value::from(format!("{} .faq__question", ctx.own(".faq"))),
            single = props.flag("singleOpen"),
        );

        Ok(RenderFragment::new(ctx.block_id()).html(html).css(css).js(js))
    }
}

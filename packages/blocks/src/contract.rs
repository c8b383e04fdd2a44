use crate::{PropSchema, RenderContext, Validation};
use pagecraft_model::Props;
use serde::Serialize;
use thiserror::Error;

/// Output of rendering one block instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderFragment {
    /// Instance the fragment was rendered for
    pub block_id: String,
    pub html: String,
    /// Instance-scoped rules only; shared type rules come from `base_css`
    pub css: String,
    pub js: String,
}

impl RenderFragment {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            ..Default::default()
        }
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn css(mut self, css: impl Into<String>) -> Self {
        self.css = css.into();
        self
    }

    pub fn js(mut self, js: impl Into<String>) -> Self {
        self.js = js.into();
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Missing prop: {0}")]
    MissingProp(String),

    #[error("Render fault: {0}")]
    Fault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Layout,
    Hero,
    Content,
    Services,
    Conversion,
}

impl BlockCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BlockCategory::Layout => "Layout",
            BlockCategory::Hero => "Hero",
            BlockCategory::Content => "Content",
            BlockCategory::Services => "Services",
            BlockCategory::Conversion => "Conversion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub block_type: &'static str,
    pub name: &'static str,
    pub category: BlockCategory,
    pub description: &'static str,
}

/// Implemented once per block type.
///
/// `render` must be a pure function of its inputs: identical props, theme
/// and mode yield byte-identical fragments. Renderers never perform I/O.
pub trait BlockRenderer: Send + Sync {
    fn metadata(&self) -> BlockMetadata;

    fn schema(&self) -> &'static PropSchema;

    fn default_props(&self) -> Props;

    /// Check `props` against the schema. Never panics on malformed input.
    fn validate(&self, props: &Props) -> Validation {
        self.schema().validate(&self.default_props(), props)
    }

    /// Rules shared by every instance of this type. Emitted once per page.
    fn base_css(&self) -> &'static str {
        ""
    }

    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<RenderFragment, RenderError>;

    fn block_type(&self) -> &'static str {
        self.metadata().block_type
    }
}

/// Build default props from a `json!` object literal.
pub fn props_from(value: serde_json::Value) -> Props {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Props::new(),
    }
}

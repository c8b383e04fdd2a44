use pagecraft_common::{escape_attr, escape_html, instance_anchor, instance_selector};
use pagecraft_model::Theme;

/// Whether output goes to the live preview or to a static export.
///
/// The mode only decides how resources are addressed; it never changes the
/// visual result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Preview,
    Export,
}

/// Everything a renderer may depend on besides its props.
///
/// Shared helpers (escaping, instance scoping, asset addressing) are exposed
/// here so renderers compose them instead of inheriting them.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub mode: RenderMode,
    block_id: &'a str,
    block_type: &'a str,
    asset_prefix: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, mode: RenderMode, block_id: &'a str, block_type: &'a str) -> Self {
        Self {
            theme,
            mode,
            block_id,
            block_type,
            asset_prefix: String::new(),
        }
    }

    /// Relative path from the exported page back to the bundle root, e.g. `../`.
    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.asset_prefix = prefix.into();
        self
    }

    pub fn block_id(&self) -> &str {
        self.block_id
    }

    pub fn block_type(&self) -> &str {
        self.block_type
    }

    pub fn is_export(&self) -> bool {
        self.mode == RenderMode::Export
    }

    /// Selector matching this instance's container only.
    pub fn scope(&self) -> String {
        instance_selector(self.block_id)
    }

    /// Selector for this instance's own root element.
    ///
    /// Nested child blocks are siblings of the root inside the container, so
    /// anything selected below `own(...)` never reaches into them.
    pub fn own(&self, root_class: &str) -> String {
        format!("{} > {}", self.scope(), root_class)
    }

    /// Element id for a part of this instance: `anchor("menu")` → `pc-<id>-menu`.
    pub fn anchor(&self, part: &str) -> String {
        format!("{}-{}", instance_anchor(self.block_id), part)
    }

    pub fn escape(&self, text: &str) -> String {
        escape_html(text)
    }

    pub fn attr(&self, text: &str) -> String {
        escape_attr(text)
    }

    /// Address a media resource.
    ///
    /// Root-relative paths (`/media/a.jpg`) are served by the preview host as
    /// is; an export rewrites them relative to the page so the bundle can be
    /// deployed under any path. Remote, protocol-relative and data URLs are
    /// never touched. The result is attribute-escaped.
    pub fn asset(&self, src: &str) -> String {
        let rewritten = match self.mode {
            RenderMode::Export if src.starts_with('/') && !src.starts_with("//") => {
                format!("{}{}", self.asset_prefix, &src[1..])
            }
            _ => src.to_string(),
        };
        escape_attr(&rewritten)
    }
}

use crate::{BlockDiagnostic, ComposedPage, DiagnosticKind};
use pagecraft_blocks::{salvage, BlockRegistry, BlockRenderer, RenderContext, RenderMode, Validation};
use pagecraft_common::{escape_attr, escape_html, instance_anchor, type_class};
use pagecraft_model::{Block, Page, Project, Props, Theme};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

/// Shared rules for the two placeholder kinds, emitted once per page.
const PLACEHOLDER_CSS: &str = r#".pc-placeholder { padding: var(--space-lg); border: 2px dashed var(--color-border); background: var(--color-surface); color: var(--color-text-muted); font-family: var(--font-mono); text-align: center; }
.pc-render-error { padding: var(--space-lg); border: 2px solid var(--color-error); background: var(--color-surface); color: var(--color-error); font-family: var(--font-mono); }"#;

/// Turns a page's block list into one `ComposedPage`.
///
/// Composition is total: unknown types, invalid props and failing renderers
/// degrade the affected block and are reported as diagnostics; the rest of
/// the page is unaffected.
#[derive(Debug, Clone)]
pub struct Composer {
    registry: Arc<BlockRegistry>,
}

impl Composer {
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self { registry }
    }

    pub fn with_builtins() -> Self {
        Self::new(Arc::new(BlockRegistry::with_builtins()))
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    #[instrument(skip(self, project), fields(project = %project.name))]
    pub fn compose_page(
        &self,
        project: &Project,
        page_id: &str,
        mode: RenderMode,
    ) -> Result<ComposedPage, CompileError> {
        let page = project
            .page(page_id)
            .ok_or_else(|| CompileError::PageNotFound(page_id.to_string()))?;
        Ok(self.compose(project, page, mode))
    }

    /// Every page in project order.
    pub fn compose_all(&self, project: &Project, mode: RenderMode) -> Vec<ComposedPage> {
        project
            .pages
            .iter()
            .map(|page| self.compose(project, page, mode))
            .collect()
    }

    fn compose(&self, project: &Project, page: &Page, mode: RenderMode) -> ComposedPage {
        let asset_prefix = match mode {
            RenderMode::Export => asset_prefix_for(&page.slug),
            RenderMode::Preview => String::new(),
        };
        let mut assembly = Assembly::new(&project.theme, mode, asset_prefix);

        if let Some(header) = &project.global_header {
            self.compose_block(header, &mut assembly);
        }
        for block in &page.blocks {
            self.compose_block(block, &mut assembly);
        }
        if let Some(footer) = &project.global_footer {
            self.compose_block(footer, &mut assembly);
        }

        debug!(
            page = %page.id,
            types = assembly.seen_types.len(),
            diagnostics = assembly.diagnostics.len(),
            "Composed page"
        );

        assembly.finish(page)
    }

    fn compose_block(&self, block: &Block, asm: &mut Assembly) {
        asm.add_line(&format!(
            "<div class=\"pc-block {}\" id=\"{}\" data-block-id=\"{}\" data-block-type=\"{}\">",
            type_class(&block.block_type),
            instance_anchor(&block.id),
            escape_attr(&block.id),
            escape_attr(&block.block_type),
        ));
        asm.indent();

        match self.registry.lookup(&block.block_type) {
            None => {
                warn!(block = %block.id, block_type = %block.block_type, "Unknown block type");
                asm.report(block, DiagnosticKind::UnknownType, format!("no renderer for type \"{}\"", block.block_type));
                asm.needs_placeholder_css = true;
                asm.add_lines(&format!(
                    "<div class=\"pc-placeholder\">Unknown block type: <code>{}</code></div>",
                    escape_html(&block.block_type)
                ));
            }
            Some(renderer) => self.render_known(block, renderer.as_ref(), asm),
        }

        for child in &block.children {
            self.compose_block(child, asm);
        }

        asm.dedent();
        asm.add_line("</div>");
    }

    fn render_known(&self, block: &Block, renderer: &dyn BlockRenderer, asm: &mut Assembly) {
        asm.note_type(&block.block_type, renderer.base_css());

        let props = self.effective_props(block, renderer, asm);
        let ctx = RenderContext::new(asm.theme, asm.mode, &block.id, &block.block_type)
            .with_asset_prefix(asm.asset_prefix.clone());

        let outcome = catch_unwind(AssertUnwindSafe(|| renderer.render(&props, &ctx)));
        let fault = match outcome {
            Ok(Ok(fragment)) => {
                asm.add_lines(&fragment.html);
                if !fragment.css.trim().is_empty() {
                    asm.instance_css.push(fragment.css);
                }
                if !fragment.js.trim().is_empty() {
                    asm.scripts.push(wrap_script(&block.id, &fragment.js));
                }
                return;
            }
            Ok(Err(err)) => err.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        warn!(block = %block.id, block_type = %block.block_type, error = %fault, "Block failed to render");
        asm.report(block, DiagnosticKind::RenderFault, fault.clone());
        asm.needs_placeholder_css = true;
        asm.add_lines(&format!(
            "<div class=\"pc-render-error\" role=\"alert\">Block <code>{}</code> failed to render: {}</div>",
            escape_html(&block.id),
            escape_html(&fault)
        ));
    }

    /// Validated props, or the salvaged subset when validation fails.
    fn effective_props(&self, block: &Block, renderer: &dyn BlockRenderer, asm: &mut Assembly) -> Props {
        let issues = match renderer.validate(&block.props) {
            Validation::Valid(props) => return props,
            Validation::Invalid(issues) => issues,
        };

        let message = issues
            .iter()
            .map(|issue| format!("{}: {}", issue.key, issue.message))
            .collect::<Vec<_>>()
            .join("; ");
        warn!(block = %block.id, issues = issues.len(), "Invalid block props, rendering salvaged subset");
        asm.report(block, DiagnosticKind::InvalidProps, message);

        let defaults = renderer.default_props();
        let salvaged = salvage(&defaults, &block.props, &issues);
        match renderer.validate(&salvaged) {
            Validation::Valid(props) => props,
            Validation::Invalid(_) => defaults,
        }
    }
}

/// Output buffers for one page, filled in document order.
struct Assembly<'a> {
    theme: &'a Theme,
    mode: RenderMode,
    asset_prefix: String,
    depth: usize,
    html: String,
    seen_types: HashSet<String>,
    base_css: Vec<&'static str>,
    instance_css: Vec<String>,
    scripts: Vec<String>,
    needs_placeholder_css: bool,
    diagnostics: Vec<BlockDiagnostic>,
}

impl<'a> Assembly<'a> {
    fn new(theme: &'a Theme, mode: RenderMode, asset_prefix: String) -> Self {
        Self {
            theme,
            mode,
            asset_prefix,
            depth: 0,
            html: String::new(),
            seen_types: HashSet::new(),
            base_css: Vec::new(),
            instance_css: Vec::new(),
            scripts: Vec::new(),
            needs_placeholder_css: false,
            diagnostics: Vec::new(),
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn add_line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.html.push_str("  ");
        }
        self.html.push_str(line);
        self.html.push('\n');
    }

    /// Add a multi-line fragment at the current depth.
    fn add_lines(&mut self, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            self.add_line(line);
        }
    }

    /// Record a type's shared rules the first time it appears.
    fn note_type(&mut self, block_type: &str, base_css: &'static str) {
        if self.seen_types.insert(block_type.to_string()) && !base_css.trim().is_empty() {
            self.base_css.push(base_css);
        }
    }

    fn report(&mut self, block: &Block, kind: DiagnosticKind, message: String) {
        self.diagnostics.push(BlockDiagnostic {
            block_id: block.id.clone(),
            block_type: block.block_type.clone(),
            kind,
            message,
        });
    }

    fn finish(self, page: &Page) -> ComposedPage {
        let mut css = String::from(":root {\n");
        for (name, value) in self.theme.tokens() {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");

        for rules in &self.base_css {
            push_block(&mut css, rules);
        }
        if self.needs_placeholder_css {
            push_block(&mut css, PLACEHOLDER_CSS);
        }
        for rules in &self.instance_css {
            push_block(&mut css, rules);
        }
        if !self.theme.custom_css.trim().is_empty() {
            push_block(&mut css, &self.theme.custom_css);
        }

        ComposedPage {
            page_id: page.id.clone(),
            title: page.title().to_string(),
            description: page.meta.description.clone(),
            html: self.html,
            css,
            js: self.scripts.concat(),
            diagnostics: self.diagnostics,
        }
    }
}

fn push_block(css: &mut String, rules: &str) {
    css.push_str(rules.trim_end());
    css.push('\n');
}

/// One IIFE per instance so renderer variables never leak between blocks.
fn wrap_script(block_id: &str, js: &str) -> String {
    format!(
        "/* {} */\n(function () {{\n{}\n}})();\n",
        instance_anchor(block_id),
        js.trim_end()
    )
}

/// `"/"` → `""`, `"/services"` → `"../"`, `"/a/b"` → `"../../"`.
fn asset_prefix_for(slug: &str) -> String {
    let depth = slug.split('/').filter(|segment| !segment.is_empty()).count();
    "../".repeat(depth)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("renderer panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("renderer panicked: {}", message)
    } else {
        "renderer panicked".to_string()
    }
}

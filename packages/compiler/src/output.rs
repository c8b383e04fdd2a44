use pagecraft_common::{escape_attr, escape_html};
use serde::Serialize;

/// How a block was degraded during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// No renderer registered; a placeholder was emitted
    UnknownType,
    /// Props failed validation; the block rendered with the salvaged subset
    InvalidProps,
    /// Renderer returned an error or panicked; an error placeholder was emitted
    RenderFault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDiagnostic {
    pub block_id: String,
    pub block_type: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// One page assembled into a single markup/style/behaviour triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPage {
    pub page_id: String,
    pub title: String,
    pub description: Option<String>,
    pub html: String,
    pub css: String,
    pub js: String,
    pub diagnostics: Vec<BlockDiagnostic>,
}

impl ComposedPage {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Wrap the page in a complete HTML document.
    ///
    /// `inline` embeds CSS and JS (preview frames); otherwise the document
    /// links `styles.css` and `app.js` next to it (export).
    pub fn to_document(&self, inline: bool) -> String {
        let mut doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        doc.push_str("  <meta charset=\"utf-8\">\n");
        doc.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        doc.push_str(&format!("  <title>{}</title>\n", escape_html(&self.title)));
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            doc.push_str(&format!(
                "  <meta name=\"description\" content=\"{}\">\n",
                escape_attr(description)
            ));
        }
        if inline {
            doc.push_str(&format!("  <style>\n{}</style>\n", guard_raw_text(&self.css, "style")));
        } else {
            doc.push_str("  <link rel=\"stylesheet\" href=\"styles.css\">\n");
        }
        doc.push_str("</head>\n<body>\n");
        doc.push_str(&self.html);
        if !self.js.is_empty() {
            if inline {
                doc.push_str(&format!("<script>\n{}</script>\n", guard_raw_text(&self.js, "script")));
            } else {
                doc.push_str("<script src=\"app.js\"></script>\n");
            }
        }
        doc.push_str("</body>\n</html>\n");
        doc
    }
}

/// Keep embedded text from closing its own `<style>`/`<script>` element.
fn guard_raw_text(text: &str, element: &str) -> String {
    text.replace(&format!("</{}", element), &format!("<\\/{}", element))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ComposedPage {
        ComposedPage {
            page_id: "home".to_string(),
            title: "Home & Co".to_string(),
            description: Some("Local \"experts\"".to_string()),
            html: "<div>body</div>\n".to_string(),
            css: ".a { color: red; }\n".to_string(),
            js: "console.log(1);\n".to_string(),
            diagnostics: vec![],
        }
    }

    #[test]
    fn test_inline_document_embeds_assets() {
        let doc = page().to_document(true);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Home &amp; Co</title>"));
        assert!(doc.contains("content=\"Local &quot;experts&quot;\""));
        assert!(doc.contains("<style>\n.a { color: red; }\n</style>"));
        assert!(doc.contains("<script>\nconsole.log(1);\n</script>"));
        assert!(!doc.contains("styles.css"));
    }

    #[test]
    fn test_linked_document_references_sibling_files() {
        let doc = page().to_document(false);
        assert!(doc.contains("<link rel=\"stylesheet\" href=\"styles.css\">"));
        assert!(doc.contains("<script src=\"app.js\"></script>"));
        assert!(!doc.contains("<style>"));
    }

    #[test]
    fn test_closing_tags_inside_css_are_neutralised() {
        let mut composed = page();
        composed.css = "body{}</style><script>alert(1)</script>".to_string();
        let doc = composed.to_document(true);
        assert_eq!(doc.matches("</style>").count(), 1);
    }

    #[test]
    fn test_empty_js_omits_script() {
        let mut composed = page();
        composed.js.clear();
        assert!(!composed.to_document(true).contains("<script"));
        assert!(!composed.to_document(false).contains("<script"));
    }
}

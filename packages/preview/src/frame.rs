use pagecraft_common::escape_attr;
use pagecraft_compiler::{BlockDiagnostic, ComposedPage};

/// One published preview render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    /// Increases with every document change; later frames supersede earlier ones
    pub generation: u64,
    pub page_id: String,
    /// Complete document with CSS and JS inlined
    pub document: String,
    pub diagnostics: Vec<BlockDiagnostic>,
}

impl PreviewFrame {
    pub fn from_page(generation: u64, page: ComposedPage) -> Self {
        Self {
            generation,
            document: page.to_document(true),
            page_id: page.page_id,
            diagnostics: page.diagnostics,
        }
    }

    /// Embed the frame in a sandboxed iframe. Scripts run, but without
    /// same-origin access to the editor.
    pub fn iframe(&self) -> String {
        format!(
            "<iframe class=\"pc-preview\" title=\"Preview\" sandbox=\"allow-scripts\" srcdoc=\"{}\"></iframe>",
            escape_attr(&self.document)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iframe_is_sandboxed_and_escaped() {
        let frame = PreviewFrame {
            generation: 1,
            page_id: "home".to_string(),
            document: "<p class=\"x\">Tom & Jerry</p>".to_string(),
            diagnostics: vec![],
        };

        let iframe = frame.iframe();
        assert!(iframe.contains("sandbox=\"allow-scripts\""));
        assert!(!iframe.contains("allow-same-origin"));
        assert!(iframe.contains("srcdoc=\"&lt;p class=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/p&gt;\""));
    }
}

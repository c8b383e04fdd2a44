use pagecraft_blocks::RenderMode;
use pagecraft_compiler::{CompileError, ComposedPage, Composer};
use pagecraft_model::{Page, Project};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Page {page} has a slug that cannot be used as a directory: {slug}")]
    UnsafeSlug { page: String, slug: String },

    #[error("Pages {first} and {second} export to the same directory")]
    PathCollision { first: String, second: String },

    #[error("{count} block(s) degraded during export")]
    Degraded { count: usize },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Refuse to produce a bundle when any block fell back to a placeholder
    pub strict: bool,
    /// Write `app.js` even for pages without behaviour
    pub always_emit_scripts: bool,
}

/// One output file, addressed relative to the bundle root with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteBundle {
    pub files: Vec<EmittedFile>,
}

impl SiteBundle {
    pub fn file(&self, path: &str) -> Option<&EmittedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

pub struct ExportAdapter {
    composer: Composer,
    options: ExportOptions,
}

impl ExportAdapter {
    pub fn new(composer: Composer) -> Self {
        Self::with_options(composer, ExportOptions::default())
    }

    pub fn with_options(composer: Composer, options: ExportOptions) -> Self {
        Self { composer, options }
    }

    pub fn export_page(&self, project: &Project, page_id: &str) -> Result<ComposedPage, ExportError> {
        Ok(self.composer.compose_page(project, page_id, RenderMode::Export)?)
    }

    /// Compose every page and lay the results out as a static site.
    pub fn export_site(&self, project: &Project) -> Result<SiteBundle, ExportError> {
        let dirs = page_dirs(project)?;
        let composed = self.composer.compose_all(project, RenderMode::Export);

        let degraded: usize = composed.iter().map(|page| page.diagnostics.len()).sum();
        if degraded > 0 {
            if self.options.strict {
                return Err(ExportError::Degraded { count: degraded });
            }
            warn!(count = degraded, "Exporting with degraded blocks");
        }

        let mut bundle = SiteBundle::default();
        for (dir, page) in dirs.iter().zip(composed) {
            bundle.files.push(EmittedFile {
                path: join(dir, "index.html"),
                contents: page.to_document(false),
            });
            bundle.files.push(EmittedFile {
                path: join(dir, "styles.css"),
                contents: page.css,
            });
            if !page.js.is_empty() || self.options.always_emit_scripts {
                bundle.files.push(EmittedFile {
                    path: join(dir, "app.js"),
                    contents: page.js,
                });
            }
        }

        info!(pages = dirs.len(), files = bundle.files.len(), "Exported site");
        Ok(bundle)
    }
}

/// Output directory of each page, in project order. The home page maps to "".
fn page_dirs(project: &Project) -> Result<Vec<String>, ExportError> {
    let mut seen: Vec<(String, &Page)> = Vec::with_capacity(project.pages.len());
    let mut taken = HashSet::new();

    for page in &project.pages {
        let dir = slug_dir(page)?;
        if !taken.insert(dir.clone()) {
            let first = seen
                .iter()
                .find(|(d, _)| *d == dir)
                .map(|(_, p)| p.id.clone())
                .unwrap_or_default();
            return Err(ExportError::PathCollision {
                first,
                second: page.id.clone(),
            });
        }
        seen.push((dir, page));
    }

    Ok(seen.into_iter().map(|(dir, _)| dir).collect())
}

fn slug_dir(page: &Page) -> Result<String, ExportError> {
    let segments: Vec<&str> = page.slug.split('/').filter(|s| !s.is_empty()).collect();
    let unsafe_segment = |s: &&str| *s == "." || *s == ".." || s.contains('\\');
    if segments.iter().any(unsafe_segment) {
        return Err(ExportError::UnsafeSlug {
            page: page.id.clone(),
            slug: page.slug.clone(),
        });
    }
    Ok(segments.join("/"))
}

fn join(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_dirs() {
        assert_eq!(slug_dir(&Page::new("home", "Home", "/")).unwrap(), "");
        assert_eq!(slug_dir(&Page::new("a", "About", "/about")).unwrap(), "about");
        assert_eq!(slug_dir(&Page::new("r", "Roofing", "/services/roofing/")).unwrap(), "services/roofing");
        assert!(matches!(
            slug_dir(&Page::new("x", "Escape", "/../etc")),
            Err(ExportError::UnsafeSlug { .. })
        ));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "index.html"), "index.html");
        assert_eq!(join("about", "app.js"), "about/app.js");
    }

    #[test]
    fn test_equivalent_slugs_collide() {
        let mut project = Project::new("Test");
        project.pages.push(Page::new("a", "About", "/about"));
        project.pages.push(Page::new("b", "About again", "about/"));

        match page_dirs(&project) {
            Err(ExportError::PathCollision { first, second }) => {
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }
}

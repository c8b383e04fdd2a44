use crate::{Block, ModelError, Page, Theme, HOME_SLUG};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Persisted project document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,

    pub pages: Vec<Page>,

    #[serde(default)]
    pub global_header: Option<Block>,

    #[serde(default)]
    pub global_footer: Option<Block>,

    #[serde(default)]
    pub theme: Theme,
}

/// Where a block lives inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLocation {
    /// Top-level block of a page's list
    Page { page_id: String, index: usize },
    /// Nested child of another block; `root` is the owning top-level block
    Nested { parent_id: String, root: Box<BlockLocation> },
    Header,
    Footer,
}

impl BlockLocation {
    /// The top-level location that owns this block.
    pub fn root(&self) -> &BlockLocation {
        match self {
            BlockLocation::Nested { root, .. } => root.root(),
            other => other,
        }
    }
}

impl Project {
    /// New project with an empty home page and the default theme.
    pub fn new(name: impl Into<String>) -> Self {
        let mut home = Page::new("home", "Home", HOME_SLUG);
        home.meta.title = Some("Home".to_string());

        Self {
            name: name.into(),
            pages: vec![home],
            global_header: None,
            global_footer: None,
            theme: Theme::default(),
        }
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    pub fn page_index(&self, page_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == page_id)
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn home_page(&self) -> Option<&Page> {
        self.page_by_slug(HOME_SLUG)
    }

    /// Find a block anywhere: page lists, nested children, header, footer.
    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.global_header
            .iter()
            .chain(self.global_footer.iter())
            .chain(self.pages.iter().flat_map(|p| p.blocks.iter()))
            .find_map(|b| b.find(block_id))
    }

    pub fn find_block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.global_header
            .iter_mut()
            .chain(self.global_footer.iter_mut())
            .chain(self.pages.iter_mut().flat_map(|p| p.blocks.iter_mut()))
            .find_map(|b| b.find_mut(block_id))
    }

    pub fn locate_block(&self, block_id: &str) -> Option<BlockLocation> {
        if let Some(header) = &self.global_header {
            if let Some(location) = locate_in(header, block_id, BlockLocation::Header) {
                return Some(location);
            }
        }
        if let Some(footer) = &self.global_footer {
            if let Some(location) = locate_in(footer, block_id, BlockLocation::Footer) {
                return Some(location);
            }
        }
        for page in &self.pages {
            for (index, block) in page.blocks.iter().enumerate() {
                let root = BlockLocation::Page {
                    page_id: page.id.clone(),
                    index,
                };
                if let Some(location) = locate_in(block, block_id, root) {
                    return Some(location);
                }
            }
        }
        None
    }

    pub fn contains_block_id(&self, block_id: &str) -> bool {
        self.find_block(block_id).is_some()
    }

    /// Every block in the project (header, pages in order, footer), depth first.
    pub fn blocks(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        if let Some(header) = &self.global_header {
            out.extend(header.walk());
        }
        for page in &self.pages {
            for block in &page.blocks {
                out.extend(block.walk());
            }
        }
        if let Some(footer) = &self.global_footer {
            out.extend(footer.walk());
        }
        out
    }

    pub fn block_ids(&self) -> Vec<&str> {
        self.blocks().into_iter().map(|b| b.id.as_str()).collect()
    }

    /// Check every structural invariant of the document.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut page_ids = HashSet::new();
        let mut slugs = HashSet::new();
        let mut home: Option<&str> = None;

        for page in &self.pages {
            if page.id.is_empty() {
                return Err(ModelError::EmptyId("page"));
            }
            if !page_ids.insert(page.id.as_str()) {
                return Err(ModelError::DuplicatePageId(page.id.clone()));
            }
            if !slugs.insert(page.slug.as_str()) {
                return Err(ModelError::DuplicateSlug(page.slug.clone()));
            }
            if page.is_home() {
                if let Some(first) = home {
                    return Err(ModelError::MultipleHomePages(
                        first.to_string(),
                        page.id.clone(),
                    ));
                }
                home = Some(page.id.as_str());
            }
        }

        let mut seen = HashSet::new();
        for block in self.blocks() {
            if block.id.is_empty() {
                return Err(ModelError::EmptyId("block"));
            }
            if !seen.insert(block.id.as_str()) {
                return Err(ModelError::DuplicateBlockId(block.id.clone()));
            }
        }

        Ok(())
    }

    /// Deserialize and validate. A structurally invalid document is a load
    /// failure; nothing is partially recovered.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        let project: Project = serde_json::from_str(source)?;
        project.validate()?;
        debug!(
            pages = project.pages.len(),
            blocks = project.blocks().len(),
            "Loaded project"
        );
        Ok(project)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&source)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        self.validate()?;
        std::fs::write(path.as_ref(), self.to_json_pretty()?)?;
        Ok(())
    }
}

fn locate_in(top: &Block, block_id: &str, root: BlockLocation) -> Option<BlockLocation> {
    if top.id == block_id {
        return Some(root);
    }
    let parent_id = top.parent_of(block_id)?;
    Some(BlockLocation::Nested {
        parent_id: parent_id.to_string(),
        root: Box::new(root),
    })
}

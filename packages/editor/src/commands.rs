//! # Commands
//!
//! The only way a project changes. Every command is validated against the
//! current project before it runs, and its inverse is computed from the
//! pre-change state, so undo restores the document exactly.
//!
//! ## Semantics
//!
//! ### Blocks
//! - `InsertBlock` rejects any id (including nested children) already in use
//! - `MoveBlock` never clamps; `from == to` is a no-op
//! - `UpdateBlockProps` merges a patch; a `null` value removes the key so the
//!   renderer default applies again
//!
//! ### Pages
//! - At most one page carries the home slug
//! - The home page can be neither removed nor given another slug
//!
//! ### Lanes
//! Block commands record history on their page's lane; header/footer, page
//! CRUD and theme changes record on the project lane.

use crate::CommandError;
use pagecraft_model::{Block, BlockLocation, Page, PageMeta, Project, Props, Theme, HOME_SLUG};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalSlot {
    Header,
    Footer,
}

/// Independent undo history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HistoryLane {
    /// Block list of one page
    Page(String),
    /// Header, footer, pages and theme
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    InsertBlock {
        page_id: String,
        index: usize,
        block: Block,
    },

    RemoveBlock {
        page_id: String,
        block_id: String,
    },

    MoveBlock {
        page_id: String,
        from: usize,
        to: usize,
    },

    /// Merge `patch` into the block's props; `null` removes a key
    UpdateBlockProps {
        block_id: String,
        patch: Props,
    },

    InsertPage {
        index: usize,
        page: Page,
    },

    RemovePage {
        page_id: String,
    },

    /// Fields left `None` are unchanged
    UpdatePageMeta {
        page_id: String,
        name: Option<String>,
        slug: Option<String>,
        meta: Option<PageMeta>,
    },

    SetGlobalBlock {
        slot: GlobalSlot,
        block: Option<Block>,
    },

    SetTheme {
        theme: Box<Theme>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::InsertBlock { .. } => "insert-block",
            Command::RemoveBlock { .. } => "remove-block",
            Command::MoveBlock { .. } => "move-block",
            Command::UpdateBlockProps { .. } => "update-block-props",
            Command::InsertPage { .. } => "insert-page",
            Command::RemovePage { .. } => "remove-page",
            Command::UpdatePageMeta { .. } => "update-page-meta",
            Command::SetGlobalBlock { .. } => "set-global-block",
            Command::SetTheme { .. } => "set-theme",
        }
    }

    /// History lane this command records on.
    pub fn lane(&self, project: &Project) -> HistoryLane {
        match self {
            Command::InsertBlock { page_id, .. }
            | Command::RemoveBlock { page_id, .. }
            | Command::MoveBlock { page_id, .. } => HistoryLane::Page(page_id.clone()),

            Command::UpdateBlockProps { block_id, .. } => {
                match project.locate_block(block_id).as_ref().map(BlockLocation::root) {
                    Some(BlockLocation::Page { page_id, .. }) => HistoryLane::Page(page_id.clone()),
                    _ => HistoryLane::Project,
                }
            }

            Command::InsertPage { .. }
            | Command::RemovePage { .. }
            | Command::UpdatePageMeta { .. }
            | Command::SetGlobalBlock { .. }
            | Command::SetTheme { .. } => HistoryLane::Project,
        }
    }

    /// True when applying would leave the project unchanged.
    pub fn is_noop(&self) -> bool {
        matches!(self, Command::MoveBlock { from, to, .. } if from == to)
    }

    /// Validate without applying
    pub fn validate(&self, project: &Project) -> Result<(), CommandError> {
        match self {
            Command::InsertBlock { page_id, index, block } => {
                let page = page_of(project, page_id)?;
                check_index(*index, page.blocks.len() + 1)?;
                check_fresh_ids(project, block, None)
            }

            Command::RemoveBlock { page_id, block_id } => {
                let page = page_of(project, page_id)?;
                page.block_index(block_id)
                    .map(|_| ())
                    .ok_or_else(|| CommandError::BlockNotFound(block_id.clone()))
            }

            Command::MoveBlock { page_id, from, to } => {
                let len = page_of(project, page_id)?.blocks.len();
                check_index(*from, len)?;
                check_index(*to, len)
            }

            Command::UpdateBlockProps { block_id, .. } => project
                .find_block(block_id)
                .map(|_| ())
                .ok_or_else(|| CommandError::BlockNotFound(block_id.clone())),

            Command::InsertPage { index, page } => {
                check_index(*index, project.pages.len() + 1)?;
                if project.page(&page.id).is_some() {
                    return Err(CommandError::DuplicatePageId(page.id.clone()));
                }
                check_slug_free(project, &page.slug, None)?;

                let mut seen = HashSet::new();
                for block in &page.blocks {
                    check_fresh_ids(project, block, None)?;
                    for nested in block.walk() {
                        if !seen.insert(nested.id.as_str()) {
                            return Err(CommandError::DuplicateBlockId(nested.id.clone()));
                        }
                    }
                }
                Ok(())
            }

            Command::RemovePage { page_id } => {
                let page = page_of(project, page_id)?;
                if page.is_home() {
                    return Err(CommandError::CannotRemoveHome(page_id.clone()));
                }
                Ok(())
            }

            Command::UpdatePageMeta { page_id, slug, .. } => {
                let page = page_of(project, page_id)?;
                if let Some(slug) = slug {
                    if page.is_home() && slug != HOME_SLUG {
                        return Err(CommandError::CannotRemoveHome(page_id.clone()));
                    }
                    check_slug_free(project, slug, Some(page_id))?;
                }
                Ok(())
            }

            Command::SetGlobalBlock { slot, block } => match block {
                Some(block) => check_fresh_ids(project, block, slot_block(project, *slot)),
                None => Ok(()),
            },

            Command::SetTheme { .. } => Ok(()),
        }
    }

    /// Apply to the project. Validates first.
    pub fn apply(&self, project: &mut Project) -> Result<(), CommandError> {
        self.validate(project)?;

        match self {
            Command::InsertBlock { page_id, index, block } => {
                page_of_mut(project, page_id)?.blocks.insert(*index, block.clone());
            }

            Command::RemoveBlock { page_id, block_id } => {
                let page = page_of_mut(project, page_id)?;
                page.blocks.retain(|b| b.id != *block_id);
            }

            Command::MoveBlock { page_id, from, to } => {
                let blocks = &mut page_of_mut(project, page_id)?.blocks;
                let block = blocks.remove(*from);
                blocks.insert(*to, block);
            }

            Command::UpdateBlockProps { block_id, patch } => {
                let block = project
                    .find_block_mut(block_id)
                    .ok_or_else(|| CommandError::BlockNotFound(block_id.clone()))?;
                for (key, value) in patch {
                    if value.is_null() {
                        block.props.remove(key);
                    } else {
                        block.props.insert(key.clone(), value.clone());
                    }
                }
            }

            Command::InsertPage { index, page } => {
                project.pages.insert(*index, page.clone());
            }

            Command::RemovePage { page_id } => {
                project.pages.retain(|p| p.id != *page_id);
            }

            Command::UpdatePageMeta { page_id, name, slug, meta } => {
                let page = page_of_mut(project, page_id)?;
                if let Some(name) = name {
                    page.name = name.clone();
                }
                if let Some(slug) = slug {
                    page.slug = slug.clone();
                }
                if let Some(meta) = meta {
                    page.meta = meta.clone();
                }
            }

            Command::SetGlobalBlock { slot, block } => match slot {
                GlobalSlot::Header => project.global_header = block.clone(),
                GlobalSlot::Footer => project.global_footer = block.clone(),
            },

            Command::SetTheme { theme } => {
                project.theme = theme.as_ref().clone();
            }
        }

        Ok(())
    }

    /// The command that undoes this one, computed from the pre-change project.
    pub fn to_inverse(&self, project: &Project) -> Result<Command, CommandError> {
        self.validate(project)?;

        let inverse = match self {
            Command::InsertBlock { page_id, block, .. } => Command::RemoveBlock {
                page_id: page_id.clone(),
                block_id: block.id.clone(),
            },

            Command::RemoveBlock { page_id, block_id } => {
                let page = page_of(project, page_id)?;
                let index = page
                    .block_index(block_id)
                    .ok_or_else(|| CommandError::BlockNotFound(block_id.clone()))?;
                Command::InsertBlock {
                    page_id: page_id.clone(),
                    index,
                    block: page.blocks[index].clone(),
                }
            }

            Command::MoveBlock { page_id, from, to } => Command::MoveBlock {
                page_id: page_id.clone(),
                from: *to,
                to: *from,
            },

            Command::UpdateBlockProps { block_id, patch } => {
                let block = project
                    .find_block(block_id)
                    .ok_or_else(|| CommandError::BlockNotFound(block_id.clone()))?;
                let previous = patch
                    .keys()
                    .map(|key| (key.clone(), block.props.get(key).cloned().unwrap_or(Value::Null)))
                    .collect();
                Command::UpdateBlockProps {
                    block_id: block_id.clone(),
                    patch: previous,
                }
            }

            Command::InsertPage { page, .. } => Command::RemovePage {
                page_id: page.id.clone(),
            },

            Command::RemovePage { page_id } => {
                let index = project
                    .page_index(page_id)
                    .ok_or_else(|| CommandError::PageNotFound(page_id.clone()))?;
                Command::InsertPage {
                    index,
                    page: project.pages[index].clone(),
                }
            }

            Command::UpdatePageMeta { page_id, name, slug, meta } => {
                let page = page_of(project, page_id)?;
                Command::UpdatePageMeta {
                    page_id: page_id.clone(),
                    name: name.as_ref().map(|_| page.name.clone()),
                    slug: slug.as_ref().map(|_| page.slug.clone()),
                    meta: meta.as_ref().map(|_| page.meta.clone()),
                }
            }

            Command::SetGlobalBlock { slot, .. } => Command::SetGlobalBlock {
                slot: *slot,
                block: slot_block(project, *slot).cloned(),
            },

            Command::SetTheme { .. } => Command::SetTheme {
                theme: Box::new(project.theme.clone()),
            },
        };

        Ok(inverse)
    }
}

fn page_of<'a>(project: &'a Project, page_id: &str) -> Result<&'a Page, CommandError> {
    project
        .page(page_id)
        .ok_or_else(|| CommandError::PageNotFound(page_id.to_string()))
}

fn page_of_mut<'a>(project: &'a mut Project, page_id: &str) -> Result<&'a mut Page, CommandError> {
    project
        .page_mut(page_id)
        .ok_or_else(|| CommandError::PageNotFound(page_id.to_string()))
}

fn slot_block(project: &Project, slot: GlobalSlot) -> Option<&Block> {
    match slot {
        GlobalSlot::Header => project.global_header.as_ref(),
        GlobalSlot::Footer => project.global_footer.as_ref(),
    }
}

/// `index` must be `< len`.
fn check_index(index: usize, len: usize) -> Result<(), CommandError> {
    if index < len {
        Ok(())
    } else {
        Err(CommandError::IndexOutOfRange { index, len })
    }
}

/// Every id in `block`'s subtree must be unused, except ids inside
/// `replacing` (the block being swapped out).
fn check_fresh_ids(project: &Project, block: &Block, replacing: Option<&Block>) -> Result<(), CommandError> {
    let released: HashSet<&str> = replacing
        .map(|b| b.walk().into_iter().map(|b| b.id.as_str()).collect())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    for nested in block.walk() {
        let id = nested.id.as_str();
        if !seen.insert(id) || (project.contains_block_id(id) && !released.contains(id)) {
            return Err(CommandError::DuplicateBlockId(id.to_string()));
        }
    }
    Ok(())
}

fn check_slug_free(project: &Project, slug: &str, except: Option<&str>) -> Result<(), CommandError> {
    let owner = project
        .pages
        .iter()
        .find(|p| p.slug == slug && Some(p.id.as_str()) != except);

    match owner {
        Some(page) if slug == HOME_SLUG => Err(CommandError::MultipleHomePages(page.id.clone())),
        Some(_) => Err(CommandError::DuplicateSlug(slug.to_string())),
        None => Ok(()),
    }
}

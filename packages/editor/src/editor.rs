use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::{Command, CommandError, EditorError, GlobalSlot, History, HistoryLane};
use pagecraft_blocks::BlockRegistry;
use pagecraft_common::fresh_id;
use pagecraft_model::{slugify, Block, Page, PageMeta, Project, Props, Theme};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the project and is the only place it changes.
///
/// Readers take cheap [`Editor::snapshot`]s; the next command copies the
/// project on write if a snapshot is still alive.
#[derive(Debug)]
pub struct Editor {
    project: Arc<Project>,
    registry: Arc<BlockRegistry>,
    histories: HashMap<HistoryLane, History>,
    history_limit: usize,
    version: u64,
}

impl Editor {
    pub fn new(project: Project, registry: Arc<BlockRegistry>) -> Result<Self, EditorError> {
        project.validate()?;
        info!(name = %project.name, pages = project.pages.len(), "Opened project");

        Ok(Self {
            project: Arc::new(project),
            registry,
            histories: HashMap::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            version: 0,
        })
    }

    /// Undo levels kept per lane. 0 = unlimited. Applies to lanes created
    /// after the call.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn snapshot(&self) -> Arc<Project> {
        Arc::clone(&self.project)
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    /// Bumped by every command, undo and redo that changed the project.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self, lane: &HistoryLane) -> Option<&History> {
        self.histories.get(lane)
    }

    /// Validate, apply and record one command.
    pub fn execute(&mut self, command: Command) -> Result<(), EditorError> {
        if command.is_noop() {
            command.validate(&self.project)?;
            return Ok(());
        }

        let lane = command.lane(&self.project);
        let limit = self.history_limit;
        let history = self
            .histories
            .entry(lane.clone())
            .or_insert_with(|| History::with_max_levels(limit));

        history.apply(&command, Arc::make_mut(&mut self.project))?;
        self.version += 1;
        debug!(command = command.name(), ?lane, version = self.version, "Applied command");
        self.prune_lanes();
        Ok(())
    }

    /// Apply several commands as one undo step on the first command's lane.
    ///
    /// All or nothing: if any command is rejected the project is unchanged.
    pub fn execute_batch(&mut self, description: &str, commands: Vec<Command>) -> Result<(), EditorError> {
        let commands: Vec<Command> = commands.into_iter().filter(|c| !c.is_noop()).collect();
        let Some(first) = commands.first() else {
            return Ok(());
        };

        let lane = first.lane(&self.project);
        let limit = self.history_limit;
        let history = self
            .histories
            .entry(lane.clone())
            .or_insert_with(|| History::with_max_levels(limit));

        let mut working = self.project.as_ref().clone();
        history.begin_batch(Some(description.to_string()));
        for command in &commands {
            if let Err(err) = history.apply(command, &mut working) {
                history.abort_batch();
                return Err(err.into());
            }
        }
        history.end_batch();

        self.project = Arc::new(working);
        self.version += 1;
        debug!(description, commands = commands.len(), ?lane, version = self.version, "Applied batch");
        self.prune_lanes();
        Ok(())
    }

    /// Undo the latest entry of `lane`. A lane whose page is currently
    /// removed has nothing to undo.
    pub fn undo(&mut self, lane: &HistoryLane) -> Result<bool, EditorError> {
        if self.is_dormant(lane) {
            return Ok(false);
        }
        let Some(history) = self.histories.get_mut(lane) else {
            return Ok(false);
        };
        if !history.can_undo() {
            return Ok(false);
        }
        history.undo(Arc::make_mut(&mut self.project))?;
        self.version += 1;
        debug!(?lane, version = self.version, "Undo");
        self.prune_lanes();
        Ok(true)
    }

    pub fn redo(&mut self, lane: &HistoryLane) -> Result<bool, EditorError> {
        if self.is_dormant(lane) {
            return Ok(false);
        }
        let Some(history) = self.histories.get_mut(lane) else {
            return Ok(false);
        };
        if !history.can_redo() {
            return Ok(false);
        }
        history.redo(Arc::make_mut(&mut self.project))?;
        self.version += 1;
        debug!(?lane, version = self.version, "Redo");
        self.prune_lanes();
        Ok(true)
    }

    pub fn can_undo(&self, lane: &HistoryLane) -> bool {
        !self.is_dormant(lane) && self.histories.get(lane).is_some_and(History::can_undo)
    }

    pub fn can_redo(&self, lane: &HistoryLane) -> bool {
        !self.is_dormant(lane) && self.histories.get(lane).is_some_and(History::can_redo)
    }

    /// A page lane whose page is not in the project right now.
    fn is_dormant(&self, lane: &HistoryLane) -> bool {
        match lane {
            HistoryLane::Page(page_id) => self.project.page(page_id).is_none(),
            HistoryLane::Project => false,
        }
    }

    /// Drop the lanes of removed pages that no project-lane undo or redo can
    /// bring back.
    fn prune_lanes(&mut self) {
        let project_lane = self.histories.get(&HistoryLane::Project);
        let can_return = |page_id: &str| {
            project_lane.is_some_and(|history| {
                history.references(|command| {
                    matches!(command, Command::InsertPage { page, .. } if page.id == page_id)
                })
            })
        };

        let dead: Vec<HistoryLane> = self
            .histories
            .keys()
            .filter(|lane| match lane {
                HistoryLane::Page(page_id) => self.project.page(page_id).is_none() && !can_return(page_id),
                HistoryLane::Project => false,
            })
            .cloned()
            .collect();

        for lane in dead {
            debug!(?lane, "Dropped history of removed page");
            self.histories.remove(&lane);
        }
    }

    // Blocks

    /// Insert a new block of `block_type` with its defaults. Returns the new id.
    pub fn insert_block(&mut self, page_id: &str, index: usize, block_type: &str) -> Result<String, EditorError> {
        let block = self
            .registry
            .instantiate(block_type)
            .ok_or_else(|| EditorError::UnknownBlockType(block_type.to_string()))?;
        let id = block.id.clone();
        self.insert_block_instance(page_id, index, block)?;
        Ok(id)
    }

    pub fn insert_block_instance(&mut self, page_id: &str, index: usize, block: Block) -> Result<(), EditorError> {
        self.execute(Command::InsertBlock {
            page_id: page_id.to_string(),
            index,
            block,
        })
    }

    pub fn remove_block(&mut self, page_id: &str, block_id: &str) -> Result<(), EditorError> {
        self.execute(Command::RemoveBlock {
            page_id: page_id.to_string(),
            block_id: block_id.to_string(),
        })
    }

    pub fn move_block(&mut self, page_id: &str, from: usize, to: usize) -> Result<(), EditorError> {
        self.execute(Command::MoveBlock {
            page_id: page_id.to_string(),
            from,
            to,
        })
    }

    pub fn update_block_props(&mut self, block_id: &str, patch: Props) -> Result<(), EditorError> {
        self.execute(Command::UpdateBlockProps {
            block_id: block_id.to_string(),
            patch,
        })
    }

    /// Insert a copy (fresh ids throughout) right after the original.
    pub fn duplicate_block(&mut self, page_id: &str, block_id: &str) -> Result<String, EditorError> {
        let page = self
            .project
            .page(page_id)
            .ok_or_else(|| CommandError::PageNotFound(page_id.to_string()))?;
        let index = page
            .block_index(block_id)
            .ok_or_else(|| CommandError::BlockNotFound(block_id.to_string()))?;

        let copy = with_fresh_ids(&page.blocks[index]);
        let id = copy.id.clone();
        self.insert_block_instance(page_id, index + 1, copy)?;
        Ok(id)
    }

    /// Remove every block of a page as one undo step.
    pub fn clear_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        let page = self
            .project
            .page(page_id)
            .ok_or_else(|| CommandError::PageNotFound(page_id.to_string()))?;

        let commands = page
            .blocks
            .iter()
            .rev()
            .map(|block| Command::RemoveBlock {
                page_id: page_id.to_string(),
                block_id: block.id.clone(),
            })
            .collect();
        self.execute_batch("Clear page", commands)
    }

    // Pages

    pub fn insert_page(&mut self, index: usize, page: Page) -> Result<(), EditorError> {
        self.execute(Command::InsertPage { index, page })
    }

    /// Append an empty page named `name` with a slug derived from it.
    /// Returns the new page id.
    pub fn add_page(&mut self, name: &str) -> Result<String, EditorError> {
        let id = fresh_id("page");
        let slug = self.free_slug(&slugify(name));
        let mut page = Page::new(id.clone(), name, slug);
        page.meta.title = Some(name.to_string());

        let index = self.project.pages.len();
        self.insert_page(index, page)?;
        Ok(id)
    }

    pub fn remove_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        self.execute(Command::RemovePage {
            page_id: page_id.to_string(),
        })
    }

    pub fn update_page_meta(
        &mut self,
        page_id: &str,
        name: Option<String>,
        slug: Option<String>,
        meta: Option<PageMeta>,
    ) -> Result<(), EditorError> {
        self.execute(Command::UpdatePageMeta {
            page_id: page_id.to_string(),
            name,
            slug,
            meta,
        })
    }

    /// `base` if unused, else `base-2`, `base-3`, ...
    fn free_slug(&self, base: &str) -> String {
        let base = if base == pagecraft_model::HOME_SLUG { "/page" } else { base };
        let taken = |slug: &str| self.project.page_by_slug(slug).is_some();
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|slug| !taken(slug))
            .unwrap_or_else(|| base.to_string())
    }

    // Global blocks and theme

    pub fn set_global_header(&mut self, block: Option<Block>) -> Result<(), EditorError> {
        self.execute(Command::SetGlobalBlock {
            slot: GlobalSlot::Header,
            block,
        })
    }

    pub fn set_global_footer(&mut self, block: Option<Block>) -> Result<(), EditorError> {
        self.execute(Command::SetGlobalBlock {
            slot: GlobalSlot::Footer,
            block,
        })
    }

    pub fn update_global_props(&mut self, slot: GlobalSlot, patch: Props) -> Result<(), EditorError> {
        let block = match slot {
            GlobalSlot::Header => self.project.global_header.as_ref(),
            GlobalSlot::Footer => self.project.global_footer.as_ref(),
        };
        let block_id = block
            .map(|b| b.id.clone())
            .ok_or_else(|| CommandError::BlockNotFound(format!("{:?}", slot).to_lowercase()))?;
        self.update_block_props(&block_id, patch)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), EditorError> {
        self.execute(Command::SetTheme {
            theme: Box::new(theme),
        })
    }
}

fn with_fresh_ids(block: &Block) -> Block {
    Block {
        id: fresh_id(&block.block_type),
        block_type: block.block_type.clone(),
        props: block.props.clone(),
        children: block.children.iter().map(with_fresh_ids).collect(),
    }
}

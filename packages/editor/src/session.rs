//! # Edit Session
//!
//! Editor plus the transient UI state of one user. UI state sits next to the
//! project, never inside it: it is not persisted, not recorded in history,
//! and undo leaves it alone. After every edit the session reconciles it with
//! the project (a removed selection is cleared, a removed page falls back to
//! the home page).

use crate::{Editor, EditorError, HistoryLane};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewDevice {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl PreviewDevice {
    /// Viewport width used to frame the preview.
    pub fn width(&self) -> u32 {
        match self {
            PreviewDevice::Desktop => 1280,
            PreviewDevice::Tablet => 768,
            PreviewDevice::Mobile => 375,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub current_page_id: Option<String>,
    pub selected_block_id: Option<String>,
    pub is_dragging: bool,
    pub preview_mode: bool,
    pub preview_device: PreviewDevice,
}

/// A block being dragged within the current page. Tracked by id, so edits
/// made while dragging cannot swap in a different block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Drag {
    page_id: String,
    block_id: String,
}

#[derive(Debug)]
pub struct EditSession {
    editor: Editor,
    ui: UiState,
    drag: Option<Drag>,
}

impl EditSession {
    pub fn new(editor: Editor) -> Self {
        let mut session = Self {
            editor,
            ui: UiState::default(),
            drag: None,
        };
        session.reconcile();
        session
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Run an edit, then bring the UI state back in line with the project.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Editor) -> Result<T, EditorError>) -> Result<T, EditorError> {
        let result = f(&mut self.editor);
        self.reconcile();
        result
    }

    pub fn undo(&mut self, lane: &HistoryLane) -> Result<bool, EditorError> {
        self.edit(|editor| editor.undo(lane))
    }

    pub fn redo(&mut self, lane: &HistoryLane) -> Result<bool, EditorError> {
        self.edit(|editor| editor.redo(lane))
    }

    /// Lane of the page currently shown.
    pub fn current_lane(&self) -> Option<HistoryLane> {
        self.ui.current_page_id.clone().map(HistoryLane::Page)
    }

    pub fn select_page(&mut self, page_id: &str) -> bool {
        if self.editor.project().page(page_id).is_none() {
            return false;
        }
        self.ui.current_page_id = Some(page_id.to_string());
        self.ui.selected_block_id = None;
        self.cancel_drag();
        true
    }

    pub fn select_block(&mut self, block_id: Option<&str>) -> bool {
        match block_id {
            Some(id) if !self.editor.project().contains_block_id(id) => false,
            _ => {
                self.ui.selected_block_id = block_id.map(str::to_string);
                true
            }
        }
    }

    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.ui.preview_mode = enabled;
    }

    pub fn set_preview_device(&mut self, device: PreviewDevice) {
        self.ui.preview_device = device;
    }

    /// Start dragging the block at `from` on the current page.
    pub fn begin_drag(&mut self, from: usize) -> bool {
        let Some(page_id) = self.ui.current_page_id.clone() else {
            return false;
        };
        let Some(block_id) = self
            .editor
            .project()
            .page(&page_id)
            .and_then(|page| page.blocks.get(from))
            .map(|block| block.id.clone())
        else {
            return false;
        };

        self.drag = Some(Drag { page_id, block_id });
        self.ui.is_dragging = true;
        true
    }

    /// Finish the drag: one `MoveBlock` of the dragged block to `to`.
    pub fn drop_at(&mut self, to: usize) -> Result<(), EditorError> {
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        self.ui.is_dragging = false;

        let from = self
            .editor
            .project()
            .page(&drag.page_id)
            .and_then(|page| page.block_index(&drag.block_id));
        let Some(from) = from else {
            debug!(block = %drag.block_id, "Dragged block is gone, drop ignored");
            return Ok(());
        };
        debug!(page = %drag.page_id, block = %drag.block_id, from, to, "Drop");
        self.edit(|editor| editor.move_block(&drag.page_id, from, to))
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.ui.is_dragging = false;
    }

    fn reconcile(&mut self) {
        let project = self.editor.project();

        let page_exists = self
            .ui
            .current_page_id
            .as_deref()
            .is_some_and(|id| project.page(id).is_some());
        if !page_exists {
            self.ui.current_page_id = project
                .home_page()
                .or_else(|| project.pages.first())
                .map(|page| page.id.clone());
            self.drag = None;
            self.ui.is_dragging = false;
        }

        let drag_alive = self.drag.as_ref().map_or(true, |drag| {
            project
                .page(&drag.page_id)
                .is_some_and(|page| page.block_index(&drag.block_id).is_some())
        });
        if !drag_alive {
            self.drag = None;
            self.ui.is_dragging = false;
        }

        let selection_exists = self
            .ui
            .selected_block_id
            .as_deref()
            .map_or(true, |id| project.contains_block_id(id));
        if !selection_exists {
            self.ui.selected_block_id = None;
        }
    }
}

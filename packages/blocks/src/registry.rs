//! # Block registry
//!
//! Static catalog from type id to renderer. Registration happens once at
//! startup; lookups are read-only. An unknown type is an ordinary `None`,
//! never a panic, so composition can substitute a placeholder.

use crate::renderers;
use crate::{BlockMetadata, BlockRenderer};
use pagecraft_common::fresh_id;
use pagecraft_model::Block;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Block type already registered: {0}")]
    Duplicate(String),
}

#[derive(Default, Clone)]
pub struct BlockRegistry {
    renderers: BTreeMap<&'static str, Arc<dyn BlockRenderer>>,
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("types", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in block type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for renderer in renderers::builtins() {
            // Built-in type ids are distinct
            let _ = registry.register_arc(renderer);
        }
        registry
    }

    /// Register a renderer. Exactly one renderer per type id.
    pub fn register(&mut self, renderer: impl BlockRenderer + 'static) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(renderer))
    }

    pub fn register_arc(&mut self, renderer: Arc<dyn BlockRenderer>) -> Result<(), RegistryError> {
        let block_type = renderer.block_type();
        if self.renderers.contains_key(block_type) {
            return Err(RegistryError::Duplicate(block_type.to_string()));
        }
        debug!(block_type, "Registered block renderer");
        self.renderers.insert(block_type, renderer);
        Ok(())
    }

    pub fn lookup(&self, block_type: &str) -> Option<Arc<dyn BlockRenderer>> {
        self.renderers.get(block_type).cloned()
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.renderers.contains_key(block_type)
    }

    /// Metadata of every registered type, by category then name.
    pub fn list_all(&self) -> Vec<BlockMetadata> {
        let mut all: Vec<BlockMetadata> = self.renderers.values().map(|r| r.metadata()).collect();
        all.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        all
    }

    /// A new block of `block_type` with a fresh id and the type's defaults.
    pub fn instantiate(&self, block_type: &str) -> Option<Block> {
        let renderer = self.renderers.get(block_type)?;
        Some(Block::new(fresh_id(block_type), block_type).with_props(renderer.default_props()))
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

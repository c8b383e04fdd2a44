use serde::{Deserialize, Serialize};

/// Block properties. Keys are ordered, so serialisation is deterministic.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// One configurable content unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique across the whole project, header and footer included
    pub id: String,

    /// Registry key of the renderer
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub props: Props,

    /// Nested blocks, rendered inside this block's container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// This block and all of its descendants, depth first.
    pub fn walk(&self) -> Vec<&Block> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    pub fn find(&self, id: &str) -> Option<&Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Block> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Id of the direct parent of `id` within this subtree.
    pub(crate) fn parent_of(&self, id: &str) -> Option<&str> {
        for child in &self.children {
            if child.id == id {
                return Some(&self.id);
            }
            if let Some(parent) = child.parent_of(id) {
                return Some(parent);
            }
        }
        None
    }
}

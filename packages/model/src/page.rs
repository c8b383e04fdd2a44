use crate::Block;
use serde::{Deserialize, Serialize};

pub const HOME_SLUG: &str = "/";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub slug: String,

    /// Literal render order
    #[serde(default)]
    pub blocks: Vec<Block>,

    #[serde(default)]
    pub meta: PageMeta,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            blocks: Vec::new(),
            meta: PageMeta::default(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn is_home(&self) -> bool {
        self.slug == HOME_SLUG
    }

    /// Title used for the document `<title>`: meta title, else page name.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.name)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }
}

/// Turn a page name into a URL slug: `"Nos Services"` → `"/nos-services"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::from("/");
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && slug.len() > 1 {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn fold_accent(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ÿ' | 'ý' => 'y',
        other => other,
    }
}

use crate::{ExportError, SiteBundle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination for exported files.
pub trait FileSink {
    /// Write `contents` at `path`, relative to the sink root, creating
    /// parent directories as needed and replacing any existing file.
    fn write(&mut self, path: &str, contents: &str) -> Result<(), std::io::Error>;
}

/// Write every file of the bundle to the sink, in bundle order.
pub fn emit(bundle: &SiteBundle, sink: &mut impl FileSink) -> Result<usize, ExportError> {
    for file in &bundle.files {
        sink.write(&file.path, &file.contents).map_err(|source| ExportError::Io {
            path: file.path.clone(),
            source,
        })?;
    }
    debug!(files = bundle.files.len(), "Emitted bundle");
    Ok(bundle.files.len())
}

/// Writes under a directory on disk.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSink for DirectorySink {
    fn write(&mut self, path: &str, contents: &str) -> Result<(), std::io::Error> {
        let target = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)
    }
}

/// Keeps files in memory, for tests and for callers that ship the bundle elsewhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl FileSink for MemorySink {
    fn write(&mut self, path: &str, contents: &str) -> Result<(), std::io::Error> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

pub mod add;
pub mod blocks;
pub mod export;
pub mod init;
pub mod preview;

pub use add::{add, AddArgs};
pub use blocks::{blocks, BlocksArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};

use anyhow::{Context, Result};
use pagecraft_model::Project;
use std::path::Path;

/// Resolve `path` against the working directory and load the project there.
pub(crate) fn load_project(cwd: &Path, path: &Path) -> Result<Project> {
    let path = cwd.join(path);
    Project::load(&path).with_context(|| format!("Failed to load project {}", path.display()))
}

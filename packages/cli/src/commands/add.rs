use super::load_project;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_blocks::BlockRegistry;
use pagecraft_editor::Editor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project file to edit
    pub project: PathBuf,

    /// Block type to insert (see `pagecraft blocks`)
    pub block_type: String,

    /// Page to insert into
    #[arg(short, long, default_value = "home")]
    pub page: String,

    /// Position on the page (defaults to the end)
    #[arg(short, long)]
    pub index: Option<usize>,
}

/// Insert a block with its default props and save the project.
pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let project = load_project(cwd, &args.project)?;
    let registry = Arc::new(BlockRegistry::with_builtins());
    let mut editor = Editor::new(project, registry)?.with_history_limit(config.history_limit);

    let len = editor
        .project()
        .page(&args.page)
        .map(|page| page.blocks.len())
        .ok_or_else(|| anyhow!("Page not found: {}", args.page))?;
    let index = args.index.unwrap_or(len);

    let block_id = editor.insert_block(&args.page, index, &args.block_type)?;

    let path = cwd.join(&args.project);
    editor
        .project()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "  {} Added {} ({}) to {} at position {}",
        "✓".green(),
        args.block_type.cyan(),
        block_id,
        args.page,
        index
    );
    Ok(())
}

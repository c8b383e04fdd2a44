use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_blocks::BlockRegistry;
use pagecraft_editor::{Editor, GlobalSlot};
use pagecraft_model::{Project, Props};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_PROJECT_NAME: &str = "project.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Site name
    #[arg(short, long, default_value = "My Business")]
    pub name: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let root = cwd.join(&args.path);
    let project_path = root.join(DEFAULT_PROJECT_NAME);
    let config_path = root.join(DEFAULT_CONFIG_NAME);

    if project_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            project_path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    if !root.exists() {
        fs::create_dir_all(&root)?;
        println!("  {} Created {}/", "✓".green(), args.path.display());
    }

    let project = starter_project(&args.name)?;
    project
        .save(&project_path)
        .with_context(|| format!("Failed to write {}", project_path.display()))?;
    println!("  {} Created {}", "✓".green(), DEFAULT_PROJECT_NAME);

    if !config_path.exists() || args.force {
        fs::write(&config_path, serde_json::to_string_pretty(&Config::default())?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft preview {}", DEFAULT_PROJECT_NAME);
    println!("  2. Run: pagecraft export {}", DEFAULT_PROJECT_NAME);
    println!("  3. Check output in dist/");

    Ok(())
}

/// Home page with a header, hero, services list and footer, built through
/// the editor so the result is a valid document.
pub fn starter_project(name: &str) -> Result<Project> {
    let registry = Arc::new(BlockRegistry::with_builtins());
    let mut editor = Editor::new(Project::new(name), registry.clone())?;

    let header = registry.instantiate("header").context("header block is not registered")?;
    let footer = registry.instantiate("footer").context("footer block is not registered")?;
    editor.set_global_header(Some(header))?;
    editor.set_global_footer(Some(footer))?;

    let hero = editor.insert_block("home", 0, "hero")?;
    editor.insert_block("home", 1, "services")?;

    editor.update_block_props(&hero, patch(json!({ "title": name })))?;
    editor.update_global_props(GlobalSlot::Header, patch(json!({ "logoText": name })))?;
    editor.update_global_props(GlobalSlot::Footer, patch(json!({ "businessName": name })))?;

    Ok(editor.project().clone())
}

fn patch(value: serde_json::Value) -> Props {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Props::new(),
    }
}

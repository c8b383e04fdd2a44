use super::load_project;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_compiler::Composer;
use pagecraft_export::{emit, DirectorySink, ExportAdapter, ExportOptions};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project file to export
    pub project: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Fail when any block renders as a placeholder
    #[arg(long)]
    pub strict: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let project = load_project(cwd, &args.project)?;
    let out_dir = match &args.out {
        Some(out) => cwd.join(out),
        None => config.out_dir(cwd),
    };

    println!("{}", "📦 Exporting site...".bright_blue().bold());

    let options = ExportOptions {
        strict: args.strict,
        ..Default::default()
    };
    let adapter = ExportAdapter::with_options(Composer::with_builtins(), options);
    let bundle = adapter.export_site(&project)?;

    let mut sink = DirectorySink::new(&out_dir);
    let written = emit(&bundle, &mut sink)?;
    info!(files = written, out = %out_dir.display(), "Export written");

    for file in &bundle.files {
        println!("  {} {}", "✓".green(), file.path);
    }
    println!();
    println!(
        "{} {} files → {}",
        "✅ Exported".green().bold(),
        written,
        out_dir.display()
    );

    Ok(())
}

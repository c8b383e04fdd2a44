mod commands;
mod config;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{add, blocks, export, init, preview, AddArgs, BlocksArgs, ExportArgs, InitArgs, PreviewArgs};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - block-based pages for small business sites
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a starter project and config
    Init(InitArgs),

    /// List the available block types
    Blocks(BlocksArgs),

    /// Insert a block into a page
    Add(AddArgs),

    /// Export the project as a static site
    Export(ExportArgs),

    /// Render a page and re-render on every save
    Preview(PreviewArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Blocks(args) => blocks(args),
            Command::Add(args) => add(args, &cwd),
            Command::Export(args) => export(args, &cwd),
            Command::Preview(args) => preview(args, &cwd).await,
        },
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

use super::load_project;
use crate::config::Config;
use crate::watcher::FileWatcher;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler::Composer;
use pagecraft_preview::{PreviewAdapter, PreviewConfig, PreviewFrame};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Project file to preview
    pub project: PathBuf,

    /// Page to render
    #[arg(short, long, default_value = "home")]
    pub page: String,

    /// Output file (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Render one frame and exit instead of watching
    #[arg(long)]
    pub once: bool,
}

/// Render the project and re-render whenever its file changes.
pub async fn preview(args: PreviewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let project_path = cwd.join(&args.project);
    let out = match &args.out {
        Some(out) => cwd.join(out),
        None => config.preview_file(cwd),
    };
    let project = load_project(cwd, &args.project)?;

    let preview_config = PreviewConfig {
        debounce: config.preview_debounce(),
        page_id: args.page.clone(),
    };
    let (handle, mut frames) = PreviewAdapter::spawn(Composer::with_builtins(), preview_config);
    handle.document_changed(Arc::new(project))?;

    let mut watcher = if args.once {
        None
    } else {
        Some(FileWatcher::new(&project_path)?)
    };

    println!("{}", "👀 Previewing...".bright_blue().bold());
    println!("   Project: {}", project_path.display());
    println!("   Output:  {}", out.display());

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                if let Some(frame) = frame {
                    write_frame(&frame, &out)?;
                    if args.once {
                        break;
                    }
                }
            }

            Some(()) = next_change(&mut watcher) => {
                match load_project(cwd, &args.project) {
                    Ok(project) => handle.document_changed(Arc::new(project))?,
                    Err(err) => {
                        warn!(error = %err, "Keeping last good project");
                        println!("  {} {:#}", "✗".red(), err);
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn next_change(watcher: &mut Option<FileWatcher>) -> Option<()> {
    match watcher.as_mut() {
        Some(watcher) => watcher.changed().await,
        None => std::future::pending().await,
    }
}

fn write_frame(frame: &PreviewFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, &frame.document).with_context(|| format!("Failed to write {}", out.display()))?;

    let status = if frame.diagnostics.is_empty() {
        "✓".green()
    } else {
        "⚠️".yellow()
    };
    println!(
        "  {} Frame {} ({}) → {}",
        status,
        frame.generation,
        frame.page_id,
        out.display()
    );
    for diagnostic in &frame.diagnostics {
        println!("     {} {}: {}", "•".yellow(), diagnostic.block_id, diagnostic.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::{starter_project, DEFAULT_PROJECT_NAME};

    #[tokio::test]
    async fn test_preview_once_writes_frame() {
        let dir = tempfile::tempdir().unwrap();
        starter_project("Acme").unwrap().save(dir.path().join(DEFAULT_PROJECT_NAME)).unwrap();

        let args = PreviewArgs {
            project: PathBuf::from(DEFAULT_PROJECT_NAME),
            page: "home".to_string(),
            out: None,
            once: true,
        };
        preview(args, dir.path()).await.unwrap();

        let document = std::fs::read_to_string(dir.path().join("preview.html")).unwrap();
        assert!(document.contains("<style>"));
        assert!(document.contains("Acme"));
    }
}

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_blocks::{BlockMetadata, BlockRegistry};

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Print the catalogue as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn blocks(args: BlocksArgs) -> Result<()> {
    let registry = BlockRegistry::with_builtins();
    let all = registry.list_all();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    println!("{}", "🧱 Available blocks".bright_blue().bold());
    for line in catalogue(&all) {
        println!("{}", line);
    }
    Ok(())
}

/// One heading per category followed by its blocks, in registry order.
fn catalogue(all: &[BlockMetadata]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = None;

    for meta in all {
        if current != Some(meta.category) {
            current = Some(meta.category);
            lines.push(String::new());
            lines.push(format!("{}", meta.category.label().bold()));
        }
        lines.push(format!(
            "  {} {}  {}",
            "•".green(),
            meta.block_type.cyan(),
            meta.description.dimmed()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_groups_by_category() {
        colored::control::set_override(false);
        let lines = catalogue(&BlockRegistry::with_builtins().list_all());

        let layout = lines.iter().position(|l| l == "Layout").unwrap();
        assert!(lines[layout + 1].contains("footer") || lines[layout + 1].contains("header"));
        assert!(lines.iter().any(|l| l.contains("• hero")));
        let headings = lines.iter().filter(|l| !l.is_empty() && !l.starts_with(' ')).count();
        assert_eq!(headings, 5);
    }
}

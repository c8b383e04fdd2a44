//! Composing the same document twice yields byte-identical output.

use pagecraft_blocks::RenderMode;
use pagecraft_compiler::Composer;
use pagecraft_model::{Block, Project};
use proptest::prelude::*;

const TYPES: [&str; 8] = ["header", "hero", "services", "content", "faq", "cta", "footer", "mystery"];

fn arb_blocks() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec((0..TYPES.len(), "[a-z ]{0,20}"), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (ty, title))| Block::new(format!("b{}", i), TYPES[ty]).with_prop("title", title))
            .collect()
    })
}

proptest! {
    #[test]
    fn composition_is_deterministic(blocks in arb_blocks()) {
        let mut project = Project::new("Determinism");
        project.pages[0].blocks = blocks;
        let composer = Composer::with_builtins();

        for mode in [RenderMode::Preview, RenderMode::Export] {
            let first = composer.compose_page(&project, "home", mode).unwrap();
            let second = composer.compose_page(&project, "home", mode).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.to_document(true), second.to_document(true));
        }
    }

    #[test]
    fn every_block_gets_exactly_one_container(blocks in arb_blocks()) {
        let mut project = Project::new("Containers");
        project.pages[0].blocks = blocks.clone();
        let page = Composer::with_builtins()
            .compose_page(&project, "home", RenderMode::Preview)
            .unwrap();

        for block in &blocks {
            let anchor = format!("id=\"pc-{}\"", block.id);
            prop_assert_eq!(page.html.matches(&anchor).count(), 1);
        }
        let unknown = blocks.iter().filter(|b| b.block_type == "mystery").count();
        prop_assert_eq!(page.html.matches("pc-placeholder").count(), unknown);
    }
}

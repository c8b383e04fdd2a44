//! Undo/redo symmetry over random edit sequences

use pagecraft_blocks::BlockRegistry;
use pagecraft_editor::{Editor, HistoryLane};
use pagecraft_model::{Block, Project, Props};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Insert(usize),
    Remove(usize),
    Move(usize, usize),
    SetTitle(usize, String),
    ClearTitle(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize).prop_map(Op::Insert),
        (0..6usize).prop_map(Op::Remove),
        (0..6usize, 0..6usize).prop_map(|(a, b)| Op::Move(a, b)),
        (0..6usize, "[a-z]{1,8}").prop_map(|(i, t)| Op::SetTitle(i, t)),
        (0..6usize).prop_map(Op::ClearTitle),
    ]
}

fn seeded_editor() -> Editor {
    let mut project = Project::new("Props");
    project.pages[0].blocks = (0..3)
        .map(|i| Block::new(format!("seed-{}", i), "hero").with_prop("title", format!("Seed {}", i)))
        .collect();
    Editor::new(project, Arc::new(BlockRegistry::with_builtins()))
        .unwrap()
        .with_history_limit(0)
}

/// Run one op; rejected commands are fine, they must just change nothing.
fn run(editor: &mut Editor, op: &Op) {
    let ids: Vec<String> = editor.project().pages[0].blocks.iter().map(|b| b.id.clone()).collect();
    let pick = |i: usize| ids.get(i % ids.len().max(1)).cloned();

    let _ = match op {
        Op::Insert(index) => editor.insert_block("home", *index, "faq").map(|_| ()),
        Op::Remove(i) => match pick(*i) {
            Some(id) => editor.remove_block("home", &id),
            None => Ok(()),
        },
        Op::Move(from, to) => editor.move_block("home", *from, *to),
        Op::SetTitle(i, title) => match pick(*i) {
            Some(id) => {
                let mut patch = Props::new();
                patch.insert("title".to_string(), json!(title));
                editor.update_block_props(&id, patch)
            }
            None => Ok(()),
        },
        Op::ClearTitle(i) => match pick(*i) {
            Some(id) => {
                let mut patch = Props::new();
                patch.insert("title".to_string(), serde_json::Value::Null);
                editor.update_block_props(&id, patch)
            }
            None => Ok(()),
        },
    };
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_is_symmetric(ops in prop::collection::vec(arb_op(), 0..25)) {
        let mut editor = seeded_editor();
        let lane = HistoryLane::Page("home".to_string());
        let initial = editor.project().clone();

        for op in &ops {
            let before = editor.project().clone();
            let version = editor.version();
            run(&mut editor, op);
            if editor.version() == version {
                prop_assert_eq!(editor.project(), &before);
            }
        }
        let edited = editor.project().clone();

        while editor.undo(&lane).unwrap() {}
        prop_assert_eq!(editor.project(), &initial);

        while editor.redo(&lane).unwrap() {}
        prop_assert_eq!(editor.project(), &edited);
    }

    #[test]
    fn undo_then_redo_is_identity(ops in prop::collection::vec(arb_op(), 1..15)) {
        let mut editor = seeded_editor();
        let lane = HistoryLane::Page("home".to_string());
        for op in &ops {
            run(&mut editor, op);
        }

        let current = editor.project().clone();
        if editor.undo(&lane).unwrap() {
            prop_assert!(editor.redo(&lane).unwrap());
        }
        prop_assert_eq!(editor.project(), &current);
    }
}

//! UI state lives beside the project and is never part of history

use pagecraft_blocks::BlockRegistry;
use pagecraft_editor::{EditSession, Editor, HistoryLane, PreviewDevice};
use pagecraft_model::{Block, Project};
use std::sync::Arc;

fn session() -> EditSession {
    let mut project = Project::new("Test");
    project.pages[0].blocks = vec![Block::new("a", "hero"), Block::new("b", "services"), Block::new("c", "cta")];
    EditSession::new(Editor::new(project, Arc::new(BlockRegistry::with_builtins())).unwrap())
}

fn order(session: &EditSession) -> Vec<&str> {
    session.editor().project().pages[0].blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_starts_on_home_page() {
    let session = session();
    assert_eq!(session.ui().current_page_id.as_deref(), Some("home"));
    assert_eq!(session.current_lane(), Some(HistoryLane::Page("home".to_string())));
}

#[test]
fn test_ui_changes_create_no_history() {
    let mut session = session();
    session.select_block(Some("b"));
    session.set_preview_mode(true);
    session.set_preview_device(PreviewDevice::Mobile);

    assert_eq!(session.editor().version(), 0);
    assert!(!session.editor().can_undo(&HistoryLane::Project));
    assert!(!session.editor().can_undo(&HistoryLane::Page("home".to_string())));
}

#[test]
fn test_undo_does_not_touch_ui_state() {
    let mut session = session();
    session
        .edit(|editor| editor.move_block("home", 0, 2))
        .unwrap();
    session.select_block(Some("a"));
    session.set_preview_device(PreviewDevice::Tablet);
    let ui = session.ui().clone();

    session.undo(&HistoryLane::Page("home".to_string())).unwrap();

    assert_eq!(order(&session), vec!["a", "b", "c"]);
    assert_eq!(session.ui(), &ui);
}

#[test]
fn test_removing_selected_block_clears_selection() {
    let mut session = session();
    session.select_block(Some("b"));

    session.edit(|editor| editor.remove_block("home", "b")).unwrap();
    assert_eq!(session.ui().selected_block_id, None);
}

#[test]
fn test_removing_current_page_falls_back_to_home() {
    let mut session = session();
    let about = session.edit(|editor| editor.add_page("About")).unwrap();
    assert!(session.select_page(&about));

    session.edit(|editor| editor.remove_page(&about)).unwrap();
    assert_eq!(session.ui().current_page_id.as_deref(), Some("home"));
}

#[test]
fn test_selecting_unknown_targets_is_refused() {
    let mut session = session();
    assert!(!session.select_page("nope"));
    assert!(!session.select_block(Some("nope")));
    assert!(session.select_block(None));
}

#[test]
fn test_drag_and_drop_is_one_move() {
    let mut session = session();
    assert!(session.begin_drag(0));
    assert!(session.ui().is_dragging);

    session.drop_at(2).unwrap();

    assert!(!session.ui().is_dragging);
    assert_eq!(order(&session), vec!["b", "c", "a"]);
    let lane = HistoryLane::Page("home".to_string());
    assert_eq!(session.editor().history(&lane).unwrap().undo_levels(), 1);
}

#[test]
fn test_drag_out_of_range_refused() {
    let mut session = session();
    assert!(!session.begin_drag(3));
    assert!(!session.ui().is_dragging);
    session.drop_at(0).unwrap();
    assert_eq!(session.editor().version(), 0);
}

#[test]
fn test_device_widths() {
    assert_eq!(PreviewDevice::default(), PreviewDevice::Desktop);
    assert!(PreviewDevice::Mobile.width() < PreviewDevice::Tablet.width());
}

#[test]
fn test_drag_follows_block_when_list_changes() {
    let mut session = session();
    assert!(session.begin_drag(1));

    session.edit(|editor| editor.insert_block("home", 0, "cta")).unwrap();
    session.drop_at(3).unwrap();

    let order = order(&session);
    assert_eq!(&order[1..], &["a", "c", "b"]);
}

#[test]
fn test_drag_cancelled_when_dragged_block_removed() {
    let mut session = session();
    assert!(session.begin_drag(1));

    session.edit(|editor| editor.remove_block("home", "b")).unwrap();
    assert!(!session.ui().is_dragging);

    let version = session.editor().version();
    session.drop_at(0).unwrap();
    assert_eq!(order(&session), vec!["a", "c"]);
    assert_eq!(session.editor().version(), version);
}

#[test]
fn test_drag_survives_undo_on_same_page() {
    let mut session = session();
    session.edit(|editor| editor.move_block("home", 2, 0)).unwrap();
    assert_eq!(order(&session), vec!["c", "a", "b"]);

    assert!(session.begin_drag(0));
    session.undo(&HistoryLane::Page("home".to_string())).unwrap();
    assert!(session.ui().is_dragging);

    session.drop_at(0).unwrap();
    assert_eq!(order(&session), vec!["c", "a", "b"]);
}

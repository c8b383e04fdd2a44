use crate::*;
use serde_json::json;

fn sample_project() -> Project {
    let mut project = Project::new("Plomberie Martin");
    project.global_header = Some(Block::new("hdr", "header").with_prop("logo", "Martin"));
    project.global_footer = Some(Block::new("ftr", "footer"));
    project.pages[0].blocks = vec![
        Block::new("a", "hero").with_prop("title", "Bienvenue"),
        Block::new("b", "services").with_children(vec![Block::new("b1", "cta")]),
    ];
    project
        .pages
        .push(Page::new("contact", "Contact", "/contact").with_blocks(vec![Block::new("c", "faq")]));
    project
}

#[test]
fn test_new_project_has_home_page() {
    let project = Project::new("Demo");
    assert_eq!(project.pages.len(), 1);
    assert!(project.home_page().is_some());
    assert!(project.validate().is_ok());
}

#[test]
fn test_find_block_everywhere() {
    let project = sample_project();
    assert_eq!(project.find_block("hdr").unwrap().block_type, "header");
    assert_eq!(project.find_block("ftr").unwrap().block_type, "footer");
    assert_eq!(project.find_block("c").unwrap().block_type, "faq");
    assert_eq!(project.find_block("b1").unwrap().block_type, "cta");
    assert!(project.find_block("missing").is_none());
}

#[test]
fn test_locate_block() {
    let project = sample_project();
    assert_eq!(project.locate_block("hdr"), Some(BlockLocation::Header));
    assert_eq!(project.locate_block("ftr"), Some(BlockLocation::Footer));
    assert_eq!(
        project.locate_block("b"),
        Some(BlockLocation::Page {
            page_id: "home".to_string(),
            index: 1
        })
    );

    let nested = project.locate_block("b1").unwrap();
    assert!(matches!(&nested, BlockLocation::Nested { parent_id, .. } if parent_id == "b"));
    assert_eq!(
        nested.root(),
        &BlockLocation::Page {
            page_id: "home".to_string(),
            index: 1
        }
    );
}

#[test]
fn test_block_ids_in_document_order() {
    let project = sample_project();
    assert_eq!(project.block_ids(), vec!["hdr", "a", "b", "b1", "c", "ftr"]);
}

#[test]
fn test_duplicate_block_id_across_pages_rejected() {
    let mut project = sample_project();
    project.pages[1].blocks.push(Block::new("a", "cta"));
    assert_eq!(project.validate(), Err(ModelError::DuplicateBlockId("a".to_string())));
}

#[test]
fn test_header_id_colliding_with_page_block_rejected() {
    let mut project = sample_project();
    project.global_footer = Some(Block::new("hdr", "footer"));
    assert_eq!(project.validate(), Err(ModelError::DuplicateBlockId("hdr".to_string())));
}

#[test]
fn test_nested_child_collision_rejected() {
    let mut project = sample_project();
    project.pages[1].blocks[0].children.push(Block::new("b1", "cta"));
    assert_eq!(project.validate(), Err(ModelError::DuplicateBlockId("b1".to_string())));
}

#[test]
fn test_duplicate_slug_rejected() {
    let mut project = sample_project();
    project.pages.push(Page::new("contact-2", "Contact 2", "/contact"));
    assert_eq!(project.validate(), Err(ModelError::DuplicateSlug("/contact".to_string())));
}

#[test]
fn test_duplicate_page_id_rejected() {
    let mut project = sample_project();
    project.pages.push(Page::new("contact", "Other", "/other"));
    assert_eq!(project.validate(), Err(ModelError::DuplicatePageId("contact".to_string())));
}

#[test]
fn test_json_shape() {
    let project = sample_project();
    let value: serde_json::Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();

    assert!(value.get("pages").is_some());
    assert!(value.get("theme").is_some());
    assert_eq!(value["globalHeader"]["type"], json!("header"));
    assert_eq!(value["globalFooter"]["id"], json!("ftr"));
    assert_eq!(value["pages"][0]["blocks"][0]["props"]["title"], json!("Bienvenue"));
    assert_eq!(value["theme"]["colors"]["textMuted"], json!("hsl(215, 20%, 65%)"));
}

#[test]
fn test_round_trip_preserves_everything() {
    let project = sample_project();
    let restored = Project::from_json(&project.to_json().unwrap()).unwrap();
    assert_eq!(restored, project);
}

#[test]
fn test_malformed_document_is_load_failure() {
    let err = Project::from_json(r#"{"pages": [{"id": "home"}]}"#).unwrap_err();
    assert!(matches!(err, ModelError::Malformed(_)));

    let err = Project::from_json("not json").unwrap_err();
    assert!(matches!(err, ModelError::Malformed(_)));
}

#[test]
fn test_structurally_invalid_document_is_load_failure() {
    let source = json!({
        "pages": [
            { "id": "home", "name": "Home", "slug": "/", "blocks": [
                { "id": "x", "type": "hero" },
                { "id": "x", "type": "cta" }
            ]}
        ]
    })
    .to_string();

    assert_eq!(
        Project::from_json(&source),
        Err(ModelError::DuplicateBlockId("x".to_string()))
    );
}

#[test]
fn test_missing_optional_fields_use_defaults() {
    let source = r#"{"pages": [{"id": "home", "name": "Home", "slug": "/"}]}"#;
    let project = Project::from_json(source).unwrap();
    assert_eq!(project.theme, Theme::default());
    assert!(project.global_header.is_none());
    assert!(project.pages[0].blocks.is_empty());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");

    let project = sample_project();
    project.save(&path).unwrap();
    assert_eq!(Project::load(&path).unwrap(), project);
}

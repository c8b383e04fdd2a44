//! Persistence round-trip properties: serialize → deserialize reproduces an
//! equal project, page order and block order included.

use pagecraft_model::{Block, Page, Project, Props};
use proptest::prelude::*;
use serde_json::Value;

fn prop_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 éà&<>\"']{0,16}".prop_map(Value::from),
        prop::collection::vec("[a-z]{1,8}".prop_map(Value::from), 0..4).prop_map(Value::Array),
    ]
}

fn props() -> impl Strategy<Value = Props> {
    prop::collection::btree_map("[a-z]{1,8}", prop_value(), 0..5)
        .prop_map(|map| map.into_iter().collect())
}

fn block_types() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hero".to_string()),
        Just("services".to_string()),
        Just("cta".to_string()),
        Just("nonexistent-widget".to_string()),
    ]
}

/// Pages with globally unique block ids (`p<page>-b<index>`).
fn project() -> impl Strategy<Value = Project> {
    let page = prop::collection::vec((block_types(), props()), 0..6);
    prop::collection::vec(page, 1..4).prop_map(|pages| {
        let mut project = Project::new("generated");
        project.pages.clear();

        for (p, blocks) in pages.into_iter().enumerate() {
            let slug = if p == 0 { "/".to_string() } else { format!("/page-{}", p) };
            let blocks = blocks
                .into_iter()
                .enumerate()
                .map(|(b, (ty, props))| Block::new(format!("p{}-b{}", p, b), ty).with_props(props))
                .collect();
            project
                .pages
                .push(Page::new(format!("page-{}", p), format!("Page {}", p), slug).with_blocks(blocks));
        }

        project.global_footer = Some(Block::new("footer", "footer"));
        project
    })
}

proptest! {
    #[test]
    fn serialize_then_deserialize_is_identity(project in project()) {
        let json = project.to_json().unwrap();
        let restored = Project::from_json(&json).unwrap();
        prop_assert_eq!(&restored, &project);

        let pretty = project.to_json_pretty().unwrap();
        prop_assert_eq!(Project::from_json(&pretty).unwrap(), project);
    }

    #[test]
    fn serialization_is_deterministic(project in project()) {
        prop_assert_eq!(project.to_json().unwrap(), project.clone().to_json().unwrap());
    }

    #[test]
    fn generated_ids_are_unique(project in project()) {
        prop_assert!(project.validate().is_ok());
    }
}

//! Rendering is a pure function of props, theme, mode and instance id.

use pagecraft_blocks::{BlockRegistry, PropsExt, RenderContext, RenderMode, Validation};
use pagecraft_model::Theme;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_every_builtin_renders_identically_twice() {
    let registry = BlockRegistry::with_builtins();
    let theme = Theme::default();

    for meta in registry.list_all() {
        let renderer = registry.lookup(meta.block_type).unwrap();
        let props = renderer.default_props();
        for mode in [RenderMode::Preview, RenderMode::Export] {
            let ctx = RenderContext::new(&theme, mode, "det", meta.block_type);
            let first = renderer.render(&props, &ctx).unwrap();
            let second = renderer.render(&props, &ctx).unwrap();
            assert_eq!(first, second, "{} is not deterministic", meta.block_type);
        }
    }
}

#[test]
fn test_defaults_render_same_markup_in_both_modes() {
    // Built-in defaults carry no root-relative media, so modes agree exactly.
    let registry = BlockRegistry::with_builtins();
    let theme = Theme::default();

    for meta in registry.list_all() {
        let renderer = registry.lookup(meta.block_type).unwrap();
        let props = renderer.default_props();
        let preview = RenderContext::new(&theme, RenderMode::Preview, "x", meta.block_type);
        let export = RenderContext::new(&theme, RenderMode::Export, "x", meta.block_type).with_asset_prefix("../");
        assert_eq!(
            renderer.render(&props, &preview).unwrap(),
            renderer.render(&props, &export).unwrap(),
            "{} differs between modes",
            meta.block_type
        );
    }
}

#[test]
fn test_instance_css_is_scoped_to_the_instance() {
    let registry = BlockRegistry::with_builtins();
    let theme = Theme::default();

    for meta in registry.list_all() {
        let renderer = registry.lookup(meta.block_type).unwrap();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "scoped", meta.block_type);
        let fragment = renderer.render(&renderer.default_props(), &ctx).unwrap();
        for rule in fragment.css.lines().filter(|l| !l.trim().is_empty()) {
            assert!(rule.starts_with("#pc-scoped"), "{}: unscoped rule {}", meta.block_type, rule);
        }
    }
}

proptest! {
    #[test]
    fn hero_title_round_trips_through_validation_and_render(title in "[a-zA-Z0-9 <>&\"']{1,60}") {
        prop_assume!(!title.trim().is_empty());
        let registry = BlockRegistry::with_builtins();
        let hero = registry.lookup("hero").unwrap();
        let mut supplied = hero.default_props();
        supplied.insert("title".to_string(), json!(title));

        let Validation::Valid(props) = hero.validate(&supplied) else {
            panic!("title should validate");
        };
        prop_assert_eq!(props.text("title"), title.as_str());

        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, RenderMode::Preview, "p", "hero");
        let fragment = hero.render(&props, &ctx).unwrap();
        prop_assert!(!fragment.html.contains("<script"));
        prop_assert_eq!(&fragment, &hero.render(&props, &ctx).unwrap());
    }
}

//! Declarative prop schemas.
//!
//! A schema is a static list of [`PropSpec`]s. Validation never panics:
//! malformed input yields a [`Validation::Invalid`] listing every offending
//! key, which the composition engine uses to salvage the valid subset.

use pagecraft_model::Props;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropKind {
    Text { max_len: usize },
    /// Link or media reference; `javascript:` and other schemes are rejected
    Url,
    Number { min: f64, max: f64 },
    Bool,
    Choice(&'static [&'static str]),
    List { item: &'static [PropSpec], max_items: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpec {
    pub key: &'static str,
    pub kind: PropKind,
    /// Supplied value may not be empty
    pub required: bool,
}

impl PropSpec {
    pub const fn text(key: &'static str, max_len: usize) -> Self {
        Self::new(key, PropKind::Text { max_len })
    }

    pub const fn url(key: &'static str) -> Self {
        Self::new(key, PropKind::Url)
    }

    pub const fn number(key: &'static str, min: f64, max: f64) -> Self {
        Self::new(key, PropKind::Number { min, max })
    }

    pub const fn flag(key: &'static str) -> Self {
        Self::new(key, PropKind::Bool)
    }

    pub const fn choice(key: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(key, PropKind::Choice(options))
    }

    pub const fn list(key: &'static str, item: &'static [PropSpec], max_items: usize) -> Self {
        Self::new(key, PropKind::List { item, max_items })
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn new(key: &'static str, kind: PropKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }

    /// Value used for a missing field inside a list item.
    fn empty_value(&self) -> Value {
        match self.kind {
            PropKind::Text { .. } | PropKind::Url => Value::from(""),
            PropKind::Number { min, .. } => Value::from(min),
            PropKind::Bool => Value::Bool(false),
            PropKind::Choice(options) => Value::from(options.first().copied().unwrap_or("")),
            PropKind::List { .. } => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Path of the offending value, e.g. `items[2].title`
    pub key: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Top-level prop the issue belongs to.
    pub fn root_key(&self) -> &str {
        self.key
            .split(|c: char| c == '[' || c == '.')
            .next()
            .unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Normalized props: defaults overlaid with every supplied known key
    Valid(Props),
    Invalid(Vec<ValidationIssue>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSchema {
    specs: &'static [PropSpec],
}

impl PropSchema {
    pub const fn new(specs: &'static [PropSpec]) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &'static [PropSpec] {
        self.specs
    }

    pub fn spec(&self, key: &str) -> Option<&'static PropSpec> {
        self.specs.iter().find(|s| s.key == key)
    }

    /// Validate `supplied` and normalize it onto `defaults`.
    ///
    /// Missing and `null` keys take the default; unknown keys are dropped.
    pub fn validate(&self, defaults: &Props, supplied: &Props) -> Validation {
        let mut issues = Vec::new();
        let mut normalized = Props::new();

        for spec in self.specs {
            let value = match supplied.get(spec.key) {
                Some(Value::Null) | None => defaults.get(spec.key).cloned(),
                Some(value) => match check(spec, spec.key, value, &mut issues) {
                    Some(value) => Some(value),
                    None => continue,
                },
            };
            if let Some(value) = value {
                normalized.insert(spec.key.to_string(), value);
            }
        }

        if issues.is_empty() {
            Validation::Valid(normalized)
        } else {
            Validation::Invalid(issues)
        }
    }
}

/// Defaults merged with the subset of `supplied` not named by any issue.
pub fn salvage(defaults: &Props, supplied: &Props, issues: &[ValidationIssue]) -> Props {
    let rejected: HashSet<&str> = issues.iter().map(|i| i.root_key()).collect();
    let mut props = defaults.clone();
    for (key, value) in supplied {
        if !rejected.contains(key.as_str()) {
            props.insert(key.clone(), value.clone());
        }
    }
    props
}

/// Returns the normalized value, or `None` after recording issues.
fn check(spec: &PropSpec, path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
    match spec.kind {
        PropKind::Text { max_len } => {
            let Some(text) = value.as_str() else {
                issues.push(ValidationIssue::new(path, "expected text"));
                return None;
            };
            if text.chars().count() > max_len {
                issues.push(ValidationIssue::new(
                    path,
                    format!("text longer than {} characters", max_len),
                ));
                return None;
            }
            if spec.required && text.trim().is_empty() {
                issues.push(ValidationIssue::new(path, "must not be empty"));
                return None;
            }
            Some(value.clone())
        }

        PropKind::Url => {
            let Some(url) = value.as_str() else {
                issues.push(ValidationIssue::new(path, "expected a URL"));
                return None;
            };
            if !is_safe_url(url) {
                issues.push(ValidationIssue::new(path, format!("unsupported URL: {}", url)));
                return None;
            }
            if spec.required && url.is_empty() {
                issues.push(ValidationIssue::new(path, "must not be empty"));
                return None;
            }
            Some(value.clone())
        }

        PropKind::Number { min, max } => match value.as_f64() {
            Some(n) if n >= min && n <= max => Some(value.clone()),
            Some(n) => {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{} is outside {}..={}", n, min, max),
                ));
                None
            }
            None => {
                issues.push(ValidationIssue::new(path, "expected a number"));
                None
            }
        },

        PropKind::Bool => {
            if value.is_boolean() {
                Some(value.clone())
            } else {
                issues.push(ValidationIssue::new(path, "expected true or false"));
                None
            }
        }

        PropKind::Choice(options) => match value.as_str() {
            Some(choice) if options.contains(&choice) => Some(value.clone()),
            _ => {
                issues.push(ValidationIssue::new(
                    path,
                    format!("expected one of {}", options.join(", ")),
                ));
                None
            }
        },

        PropKind::List { item, max_items } => {
            let Some(items) = value.as_array() else {
                issues.push(ValidationIssue::new(path, "expected a list"));
                return None;
            };
            if items.len() > max_items {
                issues.push(ValidationIssue::new(
                    path,
                    format!("more than {} items", max_items),
                ));
                return None;
            }
            if spec.required && items.is_empty() {
                issues.push(ValidationIssue::new(path, "must not be empty"));
                return None;
            }

            let before = issues.len();
            let mut normalized = Vec::with_capacity(items.len());
            for (index, entry) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                let Some(fields) = entry.as_object() else {
                    issues.push(ValidationIssue::new(item_path, "expected an object"));
                    continue;
                };

                let mut out = Props::new();
                for field in item {
                    let field_path = format!("{}.{}", item_path, field.key);
                    match fields.get(field.key) {
                        Some(Value::Null) | None if field.required => {
                            issues.push(ValidationIssue::new(field_path, "is required"));
                        }
                        Some(Value::Null) | None => {
                            out.insert(field.key.to_string(), field.empty_value());
                        }
                        Some(v) => {
                            if let Some(v) = check(field, &field_path, v, issues) {
                                out.insert(field.key.to_string(), v);
                            }
                        }
                    }
                }
                normalized.push(Value::Object(out));
            }

            if issues.len() == before {
                Some(Value::Array(normalized))
            } else {
                None
            }
        }
    }
}

fn is_safe_url(url: &str) -> bool {
    const ALLOWED: [&str; 7] = ["/", "#", "http://", "https://", "mailto:", "tel:", "data:image/"];
    url.is_empty() || ALLOWED.iter().any(|prefix| url.starts_with(prefix))
}

/// Typed reads over normalized props. Missing or mistyped keys read as empty.
pub trait PropsExt {
    fn text(&self, key: &str) -> &str;
    fn flag(&self, key: &str) -> bool;
    fn number(&self, key: &str) -> f64;
    fn items(&self, key: &str) -> &[Value];
}

impl PropsExt for Props {
    fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn number(&self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn items(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props_from;
    use serde_json::json;

    const ITEM: &[PropSpec] = &[PropSpec::text("title", 20).required(), PropSpec::flag("featured")];

    const SCHEMA: PropSchema = PropSchema::new(&[
        PropSpec::text("title", 10).required(),
        PropSpec::url("href"),
        PropSpec::number("columns", 1.0, 4.0),
        PropSpec::choice("layout", &["left", "center"]),
        PropSpec::list("items", ITEM, 3),
    ]);

    fn defaults() -> Props {
        props_from(json!({
            "title": "Default",
            "href": "#",
            "columns": 3,
            "layout": "center",
            "items": []
        }))
    }

    #[test]
    fn test_missing_keys_take_defaults_unknown_keys_dropped() {
        let supplied = props_from(json!({ "title": "Mine", "bogus": 1, "layout": null }));
        let Validation::Valid(props) = SCHEMA.validate(&defaults(), &supplied) else {
            panic!("expected valid");
        };
        assert_eq!(props.text("title"), "Mine");
        assert_eq!(props.text("layout"), "center");
        assert_eq!(props.number("columns"), 3.0);
        assert!(!props.contains_key("bogus"));
    }

    #[test]
    fn test_collects_every_issue() {
        let supplied = props_from(json!({
            "title": 42,
            "href": "javascript:alert(1)",
            "columns": 9,
            "layout": "diagonal"
        }));
        let Validation::Invalid(issues) = SCHEMA.validate(&defaults(), &supplied) else {
            panic!("expected invalid");
        };
        let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["title", "href", "columns", "layout"]);
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let supplied = props_from(json!({ "title": "   " }));
        assert!(!SCHEMA.validate(&defaults(), &supplied).is_valid());
    }

    #[test]
    fn test_list_items_are_normalized() {
        let supplied = props_from(json!({ "items": [{ "title": "One" }] }));
        let Validation::Valid(props) = SCHEMA.validate(&defaults(), &supplied) else {
            panic!("expected valid");
        };
        assert_eq!(props.items("items"), &[json!({ "title": "One", "featured": false })]);
    }

    #[test]
    fn test_list_issue_paths() {
        let supplied = props_from(json!({ "items": [{ "title": "ok" }, { "featured": true }, 7] }));
        let Validation::Invalid(issues) = SCHEMA.validate(&defaults(), &supplied) else {
            panic!("expected invalid");
        };
        assert_eq!(issues[0].key, "items[1].title");
        assert_eq!(issues[1].key, "items[2]");
        assert_eq!(issues[0].root_key(), "items");
    }

    #[test]
    fn test_salvage_keeps_valid_subset() {
        let supplied = props_from(json!({ "title": "Mine", "columns": 99, "layout": "left" }));
        let Validation::Invalid(issues) = SCHEMA.validate(&defaults(), &supplied) else {
            panic!("expected invalid");
        };
        let salvaged = salvage(&defaults(), &supplied, &issues);
        assert_eq!(salvaged.text("title"), "Mine");
        assert_eq!(salvaged.text("layout"), "left");
        assert_eq!(salvaged.number("columns"), 3.0);
        assert!(SCHEMA.validate(&defaults(), &salvaged).is_valid());
    }

    #[test]
    fn test_malformed_input_never_panics() {
        for value in [json!(null), json!([1, 2]), json!({"items": {"a": 1}}), json!({"items": [[]]})] {
            let supplied = props_from(value);
            let _ = SCHEMA.validate(&defaults(), &supplied);
        }
    }
}

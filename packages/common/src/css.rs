//! Instance namespacing.
//!
//! Every generated identifier is derived from a block's unique id, never from
//! its type alone, so two blocks of the same type stay independently stylable.

use std::fmt::Write;

/// Encode an arbitrary id as a CSS identifier fragment.
///
/// ASCII alphanumerics and `-` pass through; every other char (including `_`)
/// becomes `_<hex>_`. The mapping is injective, so distinct ids never share a
/// scope.
pub fn scope_ident(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for ch in id.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else {
            let _ = write!(out, "_{:x}_", ch as u32);
        }
    }
    out
}

/// Element id of the container wrapping one block instance.
pub fn instance_anchor(block_id: &str) -> String {
    format!("pc-{}", scope_ident(block_id))
}

/// CSS selector matching exactly one block instance.
pub fn instance_selector(block_id: &str) -> String {
    format!("#{}", instance_anchor(block_id))
}

/// Class shared by all instances of a block type.
pub fn type_class(block_type: &str) -> String {
    format!("pc-block--{}", scope_ident(block_type))
}

/// Strip characters that could end a declaration or a style element.
pub fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | ';' | '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

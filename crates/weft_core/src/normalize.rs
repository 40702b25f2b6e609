//! Property name and value normalization.

use std::sync::OnceLock;

use weft_common::{is_unitless, Memo};

use crate::style::Value;

type HyphenateMemo = Memo<String, String, fn(&String) -> String>;

static HYPHENATE: OnceLock<HyphenateMemo> = OnceLock::new();

/// Converts a camel-like property token to hyphenated lowercase form.
///
/// A `-` is inserted before every ASCII uppercase letter and before a
/// literal leading `ms`, so `backgroundColor` becomes `background-color`
/// and `msTransform` becomes `-ms-transform`. The transform is memoized
/// for the process lifetime; the space of legal property tokens is small.
pub fn hyphenate(name: &str) -> String {
    let memo = HYPHENATE.get_or_init(|| Memo::new(hyphenate_uncached as fn(&String) -> String));
    memo.get(&name.to_string())
}

fn hyphenate_uncached(name: &String) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    if name.starts_with("ms") {
        out.push('-');
    }
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Produces the declaration value text for a hyphenated property name.
///
/// Booleans and absent values normalize to empty text (the caller still
/// emits the `;` separator). Numbers are suffixed with `px` unless the
/// property is unit-exempt, the value is exactly zero, or the value is not
/// finite. Everything else passes through unchanged.
pub fn normalize_value(hyphenated_name: &str, value: &Value) -> String {
    match value {
        Value::Bool(_) | Value::None => String::new(),
        Value::Text(text) => text.clone(),
        Value::Number(n) => {
            if *n == 0.0 || !n.is_finite() || is_unitless(hyphenated_name) {
                format!("{n}")
            } else {
                format!("{n}px")
            }
        }
        // Nested blocks are serialized by the caller, never as a value.
        Value::Nested(_) => String::new(),
    }
}

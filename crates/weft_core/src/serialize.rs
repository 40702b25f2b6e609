//! Serialization of style inputs to flat CSS declaration text.
//!
//! Dynamic values resolve against the registration cache so one produced
//! style can be embedded inside another by its identifier. A value placed
//! immediately after a `.` in template text is treated as a literal selector
//! fragment instead (selector-interpolation mode), as is any explicit
//! [`Fragment::Selector`].

use std::collections::HashMap;

use crate::normalize::{hyphenate, normalize_value};
use crate::style::{Fragment, Style, Template, Value};

/// The registration cache: generated identifier to serialized style text.
pub type Registry = HashMap<String, String>;

/// Serializes a style input, resolving interpolations against `registered`.
pub fn serialize(style: &Style, registered: &Registry) -> String {
    let mut out = String::new();
    match style {
        Style::Text(text) => resolve_text(text, false, registered, &mut out),
        Style::Block(entries) => serialize_block(entries, &mut out),
        Style::List(items) => {
            for item in items {
                resolve_fragment(item, false, registered, &mut out);
            }
        }
        Style::Template(template) => serialize_template(template, registered, &mut out),
    }
    out
}

/// Walks literal segments and dynamic values in lockstep. Selector mode is
/// decided per value from the accumulated output so far.
fn serialize_template(template: &Template, registered: &Registry, out: &mut String) {
    out.push_str(template.literals.first().map(String::as_str).unwrap_or(""));
    for (i, value) in template.values.iter().enumerate() {
        let selector_mode = out.ends_with('.');
        resolve_fragment(value, selector_mode, registered, out);
        out.push_str(template.literals.get(i + 1).map(String::as_str).unwrap_or(""));
    }
}

/// Resolves one dynamic value and appends its text.
fn resolve_fragment(
    fragment: &Fragment,
    selector_mode: bool,
    registered: &Registry,
    out: &mut String,
) {
    match fragment {
        Fragment::Block(entries) => serialize_block(entries, out),
        Fragment::List(items) => {
            for item in items {
                resolve_fragment(item, false, registered, out);
            }
        }
        Fragment::Text(text) => resolve_text(text, selector_mode, registered, out),
        Fragment::Number(n) => {
            out.push_str(&format!("{n}"));
        }
        Fragment::Bool(true) => out.push_str("true"),
        Fragment::Bool(false) | Fragment::None => {}
        Fragment::Selector(token) => out.push_str(token),
    }
}

/// Appends text, expanding a registered identifier outside selector mode.
fn resolve_text(text: &str, selector_mode: bool, registered: &Registry, out: &mut String) {
    if !selector_mode {
        if let Some(expansion) = registered.get(text) {
            out.push_str(expansion);
            return;
        }
    }
    out.push_str(text);
}

/// Serializes block entries in authored order: scalar values become
/// declarations, nested values become `selector{...}` blocks.
fn serialize_block(entries: &[(String, Value)], out: &mut String) {
    for (key, value) in entries {
        if let Value::Nested(inner) = value {
            out.push_str(key);
            out.push('{');
            serialize_block(inner, out);
            out.push('}');
        } else {
            let name = hyphenate(key);
            out.push_str(&name);
            out.push(':');
            out.push_str(&normalize_value(&name, value));
            out.push(';');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::block;

    fn empty() -> Registry {
        Registry::new()
    }

    #[test]
    fn raw_text_passes_through() {
        let s = Style::Text("color:red;".to_string());
        assert_eq!(serialize(&s, &empty()), "color:red;");
    }

    #[test]
    fn raw_text_matching_registered_id_expands() {
        let mut reg = empty();
        reg.insert("css-abc".to_string(), "color:red;".to_string());
        let s = Style::Text("css-abc".to_string());
        assert_eq!(serialize(&s, &reg), "color:red;");
    }

    #[test]
    fn block_declarations_in_order() {
        let s = Style::Block(block([
            ("width", Value::from(10)),
            ("color", Value::from("red")),
        ]));
        assert_eq!(serialize(&s, &empty()), "width:10px;color:red;");
    }

    #[test]
    fn camel_case_property_names() {
        let s = Style::Block(block([("backgroundColor", Value::from("red"))]));
        assert_eq!(serialize(&s, &empty()), "background-color:red;");
    }

    #[test]
    fn zero_and_unitless_numbers() {
        let s = Style::Block(block([
            ("opacity", Value::from(0)),
            ("zIndex", Value::from(3)),
            ("margin", Value::from(0)),
        ]));
        assert_eq!(serialize(&s, &empty()), "opacity:0;z-index:3;margin:0;");
    }

    #[test]
    fn nested_selector_blocks() {
        let s = Style::Block(vec![
            ("color".to_string(), Value::from("red")),
            (
                "&:hover".to_string(),
                Value::Nested(block([("color", Value::from("blue"))])),
            ),
        ]);
        assert_eq!(serialize(&s, &empty()), "color:red;&:hover{color:blue;}");
    }

    #[test]
    fn dropped_values_keep_separator() {
        let s = Style::Block(block([("display", Value::Bool(false))]));
        assert_eq!(serialize(&s, &empty()), "display:;");
    }

    #[test]
    fn list_flattens_arbitrary_nesting_in_order() {
        let s = Style::List(vec![
            Fragment::from("color:red;"),
            Fragment::List(vec![
                Fragment::from("width:1px;"),
                Fragment::List(vec![Fragment::from("height:2px;")]),
            ]),
            Fragment::from("margin:0;"),
        ]);
        assert_eq!(
            serialize(&s, &empty()),
            "color:red;width:1px;height:2px;margin:0;"
        );
    }

    #[test]
    fn list_elements_resolve_registered_ids() {
        let mut reg = empty();
        reg.insert("css-abc".to_string(), "color:red;".to_string());
        let s = Style::List(vec![Fragment::from("css-abc"), Fragment::from("margin:0;")]);
        assert_eq!(serialize(&s, &reg), "color:red;margin:0;");
    }

    #[test]
    fn template_lockstep_concatenation() {
        let t = Template::new(
            ["color:", ";margin:", ";"],
            [Fragment::from("red"), Fragment::Number(0.0)],
        );
        assert_eq!(serialize(&Style::Template(t), &empty()), "color:red;margin:0;");
    }

    #[test]
    fn template_interpolation_expands_registered_style() {
        let mut reg = empty();
        reg.insert("css-abc".to_string(), "color:red;".to_string());
        let t = Template::new(["", "margin:0;"], [Fragment::from("css-abc")]);
        assert_eq!(serialize(&Style::Template(t), &reg), "color:red;margin:0;");
    }

    #[test]
    fn trailing_dot_forces_selector_mode() {
        let mut reg = empty();
        reg.insert("css-abc".to_string(), "color:red;".to_string());
        let t = Template::new(["&.", "{color:blue;}"], [Fragment::from("css-abc")]);
        assert_eq!(
            serialize(&Style::Template(t), &reg),
            "&.css-abc{color:blue;}"
        );
    }

    #[test]
    fn explicit_selector_fragment_never_expands() {
        let mut reg = empty();
        reg.insert("css-abc".to_string(), "color:red;".to_string());
        let t = Template::new(
            ["", " + span{color:blue;}"],
            [Fragment::Selector("css-abc".to_string())],
        );
        assert_eq!(
            serialize(&Style::Template(t), &reg),
            "css-abc + span{color:blue;}"
        );
    }

    #[test]
    fn absent_and_false_fragments_resolve_empty() {
        let t = Template::new(
            ["color:red;", "", ""],
            [Fragment::None, Fragment::Bool(false)],
        );
        assert_eq!(serialize(&Style::Template(t), &empty()), "color:red;");
    }

    #[test]
    fn nested_fragment_block_in_template() {
        let t = Template::new(
            ["color:red;", ""],
            [Fragment::Block(block([("margin", Value::from(4))]))],
        );
        assert_eq!(
            serialize(&Style::Template(t), &empty()),
            "color:red;margin:4px;"
        );
    }

    #[test]
    fn template_with_missing_trailing_literal() {
        let t = Template::new(["color:"], [Fragment::from("red")]);
        assert_eq!(serialize(&Style::Template(t), &empty()), "color:red");
    }
}

//! Style input shapes.
//!
//! A [`Style`] is immutable once constructed; the serializer dispatches on
//! its variant rather than inspecting runtime shapes. Block entries keep
//! their authored order, which determines declaration order in the output.

/// A style input prior to serialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    /// Already-serialized CSS text. If the text matches a registered
    /// identifier it resolves to that identifier's stored expansion.
    Text(String),
    /// An ordered nested mapping from property name or nested selector to
    /// value.
    Block(Vec<(String, Value)>),
    /// An ordered sequence of fragments, flattened to arbitrary depth.
    List(Vec<Fragment>),
    /// Literal text segments interleaved with dynamic values.
    Template(Template),
}

/// The value side of a block entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A literal value emitted unchanged.
    Text(String),
    /// A number, suffixed with `px` unless the property is unit-exempt or
    /// the value is zero.
    Number(f64),
    /// Booleans normalize to an empty value (the declaration is dropped).
    Bool(bool),
    /// An absent value, normalized to empty.
    None,
    /// A nested selector block.
    Nested(Vec<(String, Value)>),
}

/// A dynamic value embedded in a template or sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    /// A nested block, serialized recursively.
    Block(Vec<(String, Value)>),
    /// A nested sequence, flattened in place.
    List(Vec<Fragment>),
    /// Text: resolves to a registered identifier's expansion when one
    /// matches (outside selector-interpolation mode), otherwise passes
    /// through literally.
    Text(String),
    /// A number, rendered in its plain textual form.
    Number(f64),
    /// `false` resolves to nothing; `true` renders as literal text.
    Bool(bool),
    /// An explicit selector token. Never looked up in the registration
    /// cache, so a class identifier embedded as a selector fragment keeps
    /// its literal form.
    Selector(String),
    /// An absent value, resolved to nothing.
    None,
}

/// A tagged-template pair: literal segments plus dynamic values walked in
/// lockstep (`lit0, val0, lit1, …, litN`).
///
/// Well-formed templates have `literals.len() == values.len() + 1`; the
/// serializer treats missing trailing literals as empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    /// Literal text segments.
    pub literals: Vec<String>,
    /// Dynamic values, one between each pair of adjacent literals.
    pub values: Vec<Fragment>,
}

impl Template {
    /// Creates a template from literal segments and dynamic values.
    pub fn new(
        literals: impl IntoIterator<Item = impl Into<String>>,
        values: impl IntoIterator<Item = Fragment>,
    ) -> Self {
        Self {
            literals: literals.into_iter().map(Into::into).collect(),
            values: values.into_iter().collect(),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

/// Builds a block entry list from `(name, value)` pairs.
pub fn block(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Vec<(String, Value)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

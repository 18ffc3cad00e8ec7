use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    // Integer width tags: 7_i32, 200_ui8
    static ref INTEGER_SUFFIX: Regex = Regex::new(r"^(.+)_u?i\d+$").unwrap();
    // Float precision tags: 1.2_f64, +5_f32
    static ref FLOAT_SUFFIX: Regex = Regex::new(r"^(.+)_f\d+$").unwrap();
}

const TRUE_SPELLINGS: [&str; 5] = ["true", "t", "TRUE", "True", "T"];
const FALSE_SPELLINGS: [&str; 5] = ["false", "f", "FALSE", "False", "F"];

/// Parsed scenario value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Normalized literal token
    Scalar(String),
    /// Array value, elements in index order
    Sequence(Vec<ValueNode>),
    /// Structure value, fields in declared order
    Structure(IndexMap<String, ValueNode>),
}

impl ValueNode {
    /// Build a scalar, applying the literal normalization rules.
    pub fn scalar(token: &str) -> Self {
        ValueNode::Scalar(normalize_scalar(token))
    }

    /// Build a structure from `(name, value)` pairs.
    /// A repeated name keeps its first position and takes the last value.
    pub fn structure<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, ValueNode)>,
    {
        ValueNode::Structure(fields.into_iter().collect())
    }

    /// Number of scalars reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ValueNode::Scalar(_) => 1,
            ValueNode::Sequence(values) => values.iter().map(ValueNode::leaf_count).sum(),
            ValueNode::Structure(fields) => fields.values().map(ValueNode::leaf_count).sum(),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ValueNode::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

/// Normalize a literal token.
///
/// Boolean spellings collapse to `True` / `False`, integer width tags
/// (`_i8`, `_ui32`, ...) and float precision tags (`_f32`, `_f64`) are
/// stripped. Anything else is returned verbatim.
pub fn normalize_scalar(token: &str) -> String {
    if TRUE_SPELLINGS.contains(&token) {
        return "True".to_owned();
    }
    if FALSE_SPELLINGS.contains(&token) {
        return "False".to_owned();
    }

    if let Some(captures) = INTEGER_SUFFIX.captures(token) {
        return captures[1].to_owned();
    }
    if let Some(captures) = FLOAT_SUFFIX.captures(token) {
        return captures[1].to_owned();
    }

    token.to_owned()
}

/// Pre-structured scenario value.
///
/// Lists and maps are taken as already split; strings still go through the
/// literal grammar, so a leaf may itself be a group such as `"(t, f)"`.
/// Deserializes untagged from YAML or JSON documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(IndexMap<String, RawValue>),
}

impl RawValue {
    /// Text form of a scalar raw value, `None` for lists and maps.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            RawValue::Bool(value) => Some(value.to_string()),
            RawValue::Int(value) => Some(value.to_string()),
            // Debug keeps the decimal point: 1.0 stays "1.0"
            RawValue::Float(value) => Some(format!("{:?}", value)),
            RawValue::Text(value) => Some(value.clone()),
            RawValue::List(_) | RawValue::Map(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(values: Vec<RawValue>) -> Self {
        RawValue::List(values)
    }
}

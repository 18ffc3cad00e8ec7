use std::fmt;

use super::keywords::escape_keyword;
use super::node::{RawValue, ValueNode};
use super::parser::{parse_raw, parse_value};
use crate::error::ParseError;

/// One scalar of a flattened value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    /// Path fragment appended to the signal name: `""`, `[1]`, `.x`, `[0].x[2]`
    pub suffix: String,
    /// Normalized literal text
    pub literal: String,
}

impl Leaf {
    pub fn new(suffix: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            literal: literal.into(),
        }
    }

    pub fn as_pair(&self) -> (&str, &str) {
        (&self.suffix, &self.literal)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.suffix, self.literal)
    }
}

fn flatten_into(node: &ValueNode, suffix: &str, leaves: &mut Vec<Leaf>) {
    match node {
        ValueNode::Scalar(literal) => leaves.push(Leaf::new(suffix, literal.as_str())),
        ValueNode::Sequence(values) => {
            for (index, value) in values.iter().enumerate() {
                flatten_into(value, &format!("{}[{}]", suffix, index), leaves);
            }
        }
        ValueNode::Structure(fields) => {
            for (name, value) in fields {
                flatten_into(value, &format!("{}.{}", suffix, escape_keyword(name)), leaves);
            }
        }
    }
}

/// Flatten a value tree into its scalar leaves.
///
/// Depth first: sequence elements in index order, structure fields in
/// declared order. A bare scalar yields a single leaf with an empty suffix.
pub fn flatten(node: &ValueNode) -> Vec<Leaf> {
    let mut leaves = Vec::with_capacity(node.leaf_count());
    flatten_into(node, "", &mut leaves);
    leaves
}

/// Parse then flatten a scenario literal.
pub fn flatten_text(text: &str) -> Result<Vec<Leaf>, ParseError> {
    parse_value(text).map(|node| flatten(&node))
}

/// Parse then flatten a pre-structured value.
pub fn flatten_raw(raw: &RawValue) -> Result<Vec<Leaf>, ParseError> {
    parse_raw(raw).map(|node| flatten(&node))
}

//! Scenario value literals.
//!
//! Values written in scenarios are either bare literals or nested groups:
//!
//! ```text
//! (7_ui8, 3.14, +5_f32, {r: (t, f, true), i: 'x'})
//! ```
//!
//! [`parse_value`] turns such text into a [`ValueNode`] tree and [`flatten`]
//! walks the tree into one [`Leaf`] per scalar, each leaf carrying the path
//! suffix to append to the signal name:
//!
//! ```text
//! [0]      7
//! [1]      3.14
//! [2]      +5
//! [3].r[0] True
//! [3].r[1] False
//! [3].r[2] True
//! [3].i    'x'
//! ```
//!
//! Callers that already split the outer structure (lists and maps assembled
//! programmatically or loaded from YAML/JSON) go through [`parse_raw`], which
//! only runs the grammar on the leaf strings.

mod flatten;
mod keywords;
mod node;
mod parser;

pub use flatten::{flatten, flatten_raw, flatten_text, Leaf};
pub use keywords::{escape_keyword, is_keyword};
pub use node::{normalize_scalar, RawValue, ValueNode};
pub use parser::{parse_raw, parse_value};

//! Shared building blocks of the test harness.
//!
//! - [`values`]: scenario literal parser (`(1, {x: t})`) and flattener into
//!   `(suffix, literal)` leaves
//! - [`literal`]: native values (bool, integer, float, text) resolved from
//!   normalized literal text
//! - [`tolerance`] / [`sustain`]: numeric comparison and check duration helpers

pub mod config;
pub mod error;
pub mod literal;
pub mod sustain;
pub mod tolerance;
pub mod values;

pub use error::{ParseError, ParseErrorKind, SustainError, ToleranceError};
pub use literal::Literal;
pub use values::{flatten, parse_raw, parse_value, Leaf, RawValue, ValueNode};

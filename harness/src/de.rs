//! Deserializers accepting YAML numbers and booleans where scenario text is
//! expected (`number: 3` as well as `number: "3"`).

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use thg_common::RawValue;

fn to_text<E: Error>(raw: RawValue) -> Result<String, E> {
    raw.scalar_text()
        .ok_or_else(|| E::custom("expected a scalar, found a list or a map"))
}

pub fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    to_text(RawValue::deserialize(deserializer)?)
}

pub fn optional_scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawValue>::deserialize(deserializer)?
        .map(to_text)
        .transpose()
}

use crate::config::{DEFAULT_SUSTAIN, SUSTAIN_FOREVER, SUSTAIN_FOREVER_KEYWORD};
use crate::error::SustainError;

/// Parse scenario sustain text into a remaining-cycles count.
///
/// - `"forever"` -> `-1`
/// - `""` -> `1`
/// - `"N"` -> `N`
pub fn parse_sustain(text: &str) -> Result<i64, SustainError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DEFAULT_SUSTAIN);
    }
    if text == SUSTAIN_FOREVER_KEYWORD {
        return Ok(SUSTAIN_FOREVER);
    }

    text.parse()
        .map_err(|_| SustainError::Invalid(text.to_owned()))
}

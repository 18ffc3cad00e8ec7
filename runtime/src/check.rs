use thg_common::config::SUSTAIN_FOREVER;
use thg_common::tolerance::literal_matches;
use thg_common::Literal;

/// Active expectation on one flattened signal path.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Expected value
    pub expected: Literal,
    /// Cycles left: `1` next cycle only, `-1` until cancelled, `N` next N cycles
    pub remaining: i64,
    /// `>= 0` absolute, `< 0` relative to the expected value
    pub tolerance: f64,
    /// Selector owned by the system under test, never interpreted here
    pub filter: Option<String>,
}

impl Check {
    pub fn new(expected: Literal, remaining: i64, tolerance: f64, filter: Option<String>) -> Self {
        Self {
            expected,
            remaining,
            tolerance,
            filter,
        }
    }

    pub fn is_forever(&self) -> bool {
        self.remaining == SUSTAIN_FOREVER
    }

    pub fn matches(&self, actual: &Literal) -> bool {
        literal_matches(&self.expected, actual, self.tolerance)
    }

    // Consume one cycle of sustain, returns true once the check has expired
    pub(crate) fn tick(&mut self) -> bool {
        if self.is_forever() {
            return false;
        }
        self.remaining -= 1;
        self.remaining <= 0
    }
}

use std::fmt;

use indexmap::IndexMap;
use thg_common::Literal;

use crate::sut::SystemUnderTest;

type StepFn = Box<dyn FnMut(&mut IndexMap<String, Literal>)>;

/// In-memory system under test.
///
/// Signals live in a flat path -> value map. An optional step function
/// computes the next state on every cycle.
pub struct MemorySystem {
    signals: IndexMap<String, Literal>,
    step: Option<StepFn>,
    cycles: u64,
}

impl MemorySystem {
    pub fn new() -> Self {
        Self {
            signals: IndexMap::new(),
            step: None,
            cycles: 0,
        }
    }

    /// Declare a signal with its initial value.
    pub fn with_signal(mut self, path: &str, value: impl Into<Literal>) -> Self {
        self.signals.insert(path.to_owned(), value.into());
        self
    }

    /// Function run on every cycle.
    pub fn with_step<F>(mut self, step: F) -> Self
    where
        F: FnMut(&mut IndexMap<String, Literal>) + 'static,
    {
        self.step = Some(Box::new(step));
        self
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn signals(&self) -> &IndexMap<String, Literal> {
        &self.signals
    }
}

impl Default for MemorySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemorySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySystem")
            .field("signals", &self.signals)
            .field("cycles", &self.cycles)
            .finish()
    }
}

impl SystemUnderTest for MemorySystem {
    fn call_cycle(&mut self) {
        if let Some(step) = self.step.as_mut() {
            step(&mut self.signals);
        }
        self.cycles += 1;
    }

    fn read(&self, path: &str) -> Option<Literal> {
        self.signals.get(path).cloned()
    }

    fn write(&mut self, path: &str, value: Literal) -> bool {
        match self.signals.get_mut(path) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

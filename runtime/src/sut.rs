use thg_common::Literal;

/// The design being tested.
///
/// The oracle only drives it one cycle at a time and reads values back.
/// `call_cycle` runs to completion; the oracle has no timeout around it.
pub trait SystemUnderTest {
    /// Run one cycle of the design.
    fn call_cycle(&mut self);

    /// Current value at a flattened signal path, `None` if the path is unknown.
    fn read(&self, path: &str) -> Option<Literal>;

    /// Assign an input at a flattened signal path.
    ///
    /// Returns `false` if the path is unknown.
    fn write(&mut self, path: &str, value: Literal) -> bool;
}

impl<T: SystemUnderTest + ?Sized> SystemUnderTest for Box<T> {
    fn call_cycle(&mut self) {
        (**self).call_cycle()
    }

    fn read(&self, path: &str) -> Option<Literal> {
        (**self).read(path)
    }

    fn write(&mut self, path: &str, value: Literal) -> bool {
        (**self).write(path, value)
    }
}

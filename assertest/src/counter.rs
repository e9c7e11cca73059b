use std::cell::Cell;

/// Function-local check counter.
///
/// Expanded code binds counters by shared reference (`let n = &Counter::new();`), so
/// closures inside the checked function can bump them without needing `mut` or `move`
/// gymnastics. A fresh pair is created on every call of the checked function.
#[derive(Debug, Default)]
pub struct Counter(Cell<usize>);

impl Counter {
    /// A counter starting at zero.
    pub const fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

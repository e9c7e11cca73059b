//! Per-thread capture of check reports.
//!
//! Reports normally go to stdout. Inside [`capture`] they are appended to an in-memory
//! buffer instead, together with every [`Summary`] emitted, which is how the crate's
//! own tests observe the output of checked functions.

use std::cell::RefCell;

use crate::report::Summary;

/// Everything reported on one thread while a [`capture`] was active.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captured {
    pub output: String,
    pub summaries: Vec<Summary>,
}

impl Captured {
    pub fn last_summary(&self) -> Option<&Summary> {
        self.summaries.last()
    }

    /// The literal texts printed for failed checks, in report order.
    pub fn failed_checks(&self) -> Vec<&str> {
        self.output
            .lines()
            .filter_map(|line| line.strip_prefix("\t>\t"))
            .collect()
    }
}

thread_local! {
    static CAPTURES: RefCell<Vec<Captured>> = const { RefCell::new(Vec::new()) };
}

/// Pops the capture frame even if the captured closure unwinds.
struct Frame {
    depth: usize,
}

impl Drop for Frame {
    fn drop(&mut self) {
        CAPTURES.with(|captures| captures.borrow_mut().truncate(self.depth));
    }
}

/// Run `f`, collecting every report it emits on this thread.
///
/// Captures nest: only the innermost active capture receives output.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Captured) {
    let depth = CAPTURES.with(|captures| {
        let mut captures = captures.borrow_mut();
        captures.push(Captured::default());
        captures.len() - 1
    });
    let frame = Frame { depth };
    let result = f();
    let captured = CAPTURES
        .with(|captures| captures.borrow_mut().pop())
        .unwrap_or_default();
    drop(frame);
    (result, captured)
}

/// Append `text` to the innermost capture. Returns `false` when nothing is capturing.
pub(crate) fn write(text: &str) -> bool {
    CAPTURES.with(|captures| match captures.borrow_mut().last_mut() {
        Some(captured) => {
            captured.output.push_str(text);
            true
        }
        None => false,
    })
}

pub(crate) fn record(summary: &Summary) {
    CAPTURES.with(|captures| {
        if let Some(captured) = captures.borrow_mut().last_mut() {
            captured.summaries.push(summary.clone());
        }
    });
}

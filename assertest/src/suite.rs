//! Closure-based checks, for when rewriting a whole function is not wanted.
//!
//! ```
//! use assertest::{Suite, check};
//!
//! let mut suite = Suite::new("arithmetic");
//! check!(suite, assert_eq!(1 + 1, 2));
//! check!(suite, assert!(2 < 1));
//! let summary = suite.run();
//! assert_eq!((summary.passed, summary.total), (1, 2));
//! ```

use std::panic::Location;

use crate::{
    counter::Counter,
    guard,
    report::{self, CheckSite, Summary},
};

struct Check<'a> {
    label: String,
    line: u32,
    body: Box<dyn FnOnce() + 'a>,
}

/// An ordered list of labelled checks reported like a checked function.
pub struct Suite<'a> {
    name: String,
    origin: u32,
    checks: Vec<Check<'a>>,
}

impl<'a> Suite<'a> {
    /// Failure lines are reported relative to the line this is called from.
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Location::caller().line(),
            checks: Vec::new(),
        }
    }

    /// Register a check; `label` stands in for its source text in diagnostics.
    #[track_caller]
    pub fn check(&mut self, label: impl Into<String>, body: impl FnOnce() + 'a) -> &mut Self {
        self.check_at(label, Location::caller().line(), body)
    }

    /// Register a check found at a known source line. Used by [`check!`](crate::check).
    pub fn check_at(
        &mut self,
        label: impl Into<String>,
        line: u32,
        body: impl FnOnce() + 'a,
    ) -> &mut Self {
        self.checks.push(Check {
            label: label.into(),
            line,
            body: Box::new(body),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check in registration order and report the outcome.
    pub fn run(self) -> Summary {
        report::banner(&self.name);
        report::failures_header(&self.name);
        let total = &Counter::new();
        let passed = &Counter::new();

        for check in self.checks {
            match guard::protect(check.body) {
                Ok(()) => passed.increment(),
                Err(failure) => report::failure(
                    &self.name,
                    &CheckSite {
                        origin: self.origin,
                        line: check.line,
                        text: &check.label,
                    },
                    &failure,
                ),
            }
            total.increment();
        }

        report::summary(&self.name, passed.get(), total.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::capture;

    #[test]
    fn empty_suite_reports_zero_of_zero() {
        let (summary, captured) = capture(|| Suite::new("empty").run());
        assert_eq!((summary.passed, summary.total), (0, 0));
        assert!(captured.output.contains("==== empty: 0/0 tests passed ===="));
        assert!(captured.failed_checks().is_empty());
    }

    #[test]
    fn labels_are_printed_for_failures_only() {
        let (summary, captured) = capture(|| {
            let mut suite = Suite::new("labels");
            suite
                .check("first", || assert!(true))
                .check("second", || assert!(false))
                .check("third", || assert_eq!(3, 3));
            suite.run()
        });
        assert_eq!((summary.passed, summary.total), (2, 3));
        assert_eq!(captured.failed_checks(), vec!["second"]);
    }

    #[test]
    fn check_lines_are_relative_to_the_suite() {
        let (_, captured) = capture(|| {
            let mut suite = Suite::new("lines");
            suite.check_at("late", suite.origin + 4, || panic!("late"));
            suite.run()
        });
        assert!(captured.output.contains("\nFunction line 4:\n\t>\tlate\n"));
    }
}

//! Formatting and emission of check reports.
//!
//! A checked function reports, in order:
//!
//! ```text
//!
//! ======== Testing f ========
//!
//! ________ Failures _________
//!
//! Function line 3:
//! 	>	assert!(false)
//!
//! ==== f: 2/3 tests passed ====
//!
//! ```
//!
//! [`banner_line`], [`failures_rule`], [`failure_lines`] and [`summary_line`] only format.
//! The other functions write to stdout, or to the active [`capture`](crate::capture::capture)
//! buffer.

use crate::{
    capture,
    counter::Counter,
    error::{AssertestError, AssertestResult, CheckFailure},
};

pub const FAILURES_LABEL: &str = "Failures";

/// Where a check lives and what it says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSite<'a> {
    /// Line of the enclosing function's `fn` keyword (or of the suite's creation).
    pub origin: u32,
    /// Line of the check itself.
    pub line: u32,
    /// Literal source text of the check.
    pub text: &'a str,
}

impl CheckSite<'_> {
    /// Line of the check relative to its origin; the first body line is 1.
    pub fn offset(&self) -> u32 {
        self.line.saturating_sub(self.origin)
    }
}

/// Final tally of one run of a checked function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Summary {
    pub name: String,
    pub passed: usize,
    pub total: usize,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.total.saturating_sub(self.passed)
    }

    pub fn is_success(&self) -> bool {
        self.passed == self.total
    }

    /// `Ok(self)` when every check passed.
    pub fn into_result(self) -> AssertestResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AssertestError::ChecksFailed {
                failed: self.failed(),
                total: self.total,
                name: self.name,
            })
        }
    }
}

pub fn banner_line(name: &str) -> String {
    format!("======== Testing {name} ========")
}

/// `Failures` centered in underscores, as wide as the banner line.
pub fn failures_rule(name: &str) -> String {
    let width = banner_line(name).chars().count();
    let label = format!(" {FAILURES_LABEL} ");
    format!("{label:_^width$}")
}

pub fn failure_lines(site: &CheckSite<'_>) -> [String; 2] {
    [
        format!("Function line {}:", site.offset()),
        format!("\t>\t{}", site.text),
    ]
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "==== {}: {}/{} tests passed ====",
        summary.name, summary.passed, summary.total
    )
}

/// `print!` rather than a raw stdout handle, so the test harness captures reports of
/// passing tests like any other output.
fn emit(text: &str) {
    if !capture::write(text) {
        print!("{text}");
    }
}

pub fn banner(name: &str) {
    emit(&format!("\n{}\n\n", banner_line(name)));
}

pub fn failures_header(name: &str) {
    emit(&format!("{}\n", failures_rule(name)));
}

/// Print the diagnostic for one failed check, right away.
pub fn failure(name: &str, site: &CheckSite<'_>, failure: &CheckFailure) {
    log::debug!(
        "{name}: check at line {} failed: {failure}",
        site.offset()
    );
    let [header, text] = failure_lines(site);
    emit(&format!("\n{header}\n{text}\n"));
}

pub fn summary(name: &str, passed: usize, total: usize) -> Summary {
    let summary = Summary {
        name: name.to_string(),
        passed,
        total,
    };
    log::info!("{}", summary_line(&summary));
    emit(&format!("\n{}\n\n", summary_line(&summary)));
    capture::record(&summary);
    summary
}

/// Emits the summary of a checked function when its body's scope ends.
///
/// Bound right after the counters, so the summary is printed after the whole body
/// whether it finishes normally, returns early, or unwinds.
pub struct SummaryGuard<'a> {
    name: &'a str,
    total: &'a Counter,
    passed: &'a Counter,
    strict: bool,
}

impl<'a> SummaryGuard<'a> {
    pub fn new(name: &'a str, total: &'a Counter, passed: &'a Counter) -> Self {
        Self {
            name,
            total,
            passed,
            strict: false,
        }
    }

    /// Panic after the summary if any check failed.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Drop for SummaryGuard<'_> {
    fn drop(&mut self) {
        let summary = summary(self.name, self.passed.get(), self.total.get());
        if self.strict && !std::thread::panicking() {
            if let Err(error) = summary.into_result() {
                panic!("{error}");
            }
        }
    }
}

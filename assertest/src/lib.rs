//! Assertest: counted, non-fatal assertions.
//!
//! Annotating a function with [`assert_tests`] rewrites its body at compile time so
//! that every `assert!`, `assert_eq!` and `assert_ne!` becomes an independent check.
//! A failing check prints where it is and what it says, then execution simply moves
//! on to the next statement. When the function is done it prints how many checks
//! passed.
//!
//! ```
//! use assertest::assert_tests;
//!
//! #[assert_tests]
//! fn f() {
//!     assert!(true);
//!     assert!(false);
//!     assert_eq!(3, 3);
//! }
//!
//! let ((), captured) = assertest::capture::capture(f);
//! let summary = captured.last_summary().unwrap();
//! assert_eq!((summary.passed, summary.total), (2, 3));
//! assert!(captured.output.contains("==== f: 2/3 tests passed ===="));
//! ```
//!
//! Expanded code only reaches into this crate through absolute paths ([`Counter`],
//! [`guard::protect`], [`report`]), which is why those items are public. The
//! [`Suite`] type offers the same reporting for checks given as closures.

extern crate self as assertest;

pub mod capture;
mod counter;
pub mod error;
pub mod guard;
pub mod report;
mod suite;

pub use assertest_derive::{assert_tests, check};
pub use counter::Counter;
pub use report::Summary;
pub use suite::Suite;

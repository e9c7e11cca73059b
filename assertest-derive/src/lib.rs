//! Procedural macro behind `assertest`: rewrites a function so that each assertion is a
//! counted, non-fatal check.
//!
//! The expansion runs in fixed stages, each in its own module:
//! `locate` → `sanitize` → `inject_counters` → `transform` → `inject_report` → `rebind`.
//!
//! Use it through the `assertest` crate, which provides the runtime the expansion calls.

use proc_macro::TokenStream;

mod check;
mod config;
mod error;
mod inject;
mod locate;
mod rebind;
mod sanitize;
mod transform;

/// Turn every `assert!`, `assert_eq!` and `assert_ne!` in a function into a counted,
/// non-fatal check and print a pass/total report on each call.
///
/// Options: `name = "label"`, `total = ident`, `passed = ident`, `crate = "path"` and
/// `strict` (panic after the report if any check failed).
#[proc_macro_attribute]
pub fn assert_tests(attr: TokenStream, item: TokenStream) -> TokenStream {
    rebind::expand(attr.into(), item.into())
        .map_err(syn::Error::from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Register a check with an `assertest::Suite`, labelled with the check's source text.
///
/// `check!(suite, assert_eq!(x, 3))` is `suite.check_at("assert_eq!(x, 3)", line!(), ..)`.
#[proc_macro]
pub fn check(input: TokenStream) -> TokenStream {
    syn::parse::<check::CheckInput>(input)
        .map(|input| input.expand())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

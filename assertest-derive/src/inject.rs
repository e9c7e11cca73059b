//! Statements added around the rewritten body: counters, banner and summary.

use proc_macro2::Ident;
use syn::{Block, Stmt, parse_quote};

use crate::config::ResolvedConfig;

/// Number of statements [`inject_counters`] places at the start of the body.
pub const COUNTER_STATEMENTS: usize = 2;

/// Prepend `let total = &Counter::new(); let passed = &Counter::new();`.
pub fn inject_counters(block: &mut Block, config: &ResolvedConfig) {
    let ResolvedConfig {
        total,
        passed,
        runtime,
        ..
    } = config;
    let inits: [Stmt; COUNTER_STATEMENTS] = [
        parse_quote!(let #total = &#runtime::Counter::new();),
        parse_quote!(let #passed = &#runtime::Counter::new();),
    ];
    block.stmts.splice(0..0, inits);
}

/// Add the banner, the `Failures` header and the summary around a body that already
/// starts with its counters.
///
/// The resulting order is `[banner, header][counters][summary guard][body]`. The summary
/// is printed when the guard goes out of scope, which is after everything else in the
/// body, including on early `return`.
pub fn inject_report(block: &mut Block, config: &ResolvedConfig, guard: &Ident) {
    let ResolvedConfig {
        name,
        total,
        passed,
        runtime,
        strict,
    } = config;

    let summary: Stmt = if *strict {
        parse_quote!(let #guard = #runtime::report::SummaryGuard::new(#name, #total, #passed).strict();)
    } else {
        parse_quote!(let #guard = #runtime::report::SummaryGuard::new(#name, #total, #passed);)
    };
    block.stmts.insert(COUNTER_STATEMENTS, summary);

    let header: [Stmt; 2] = [
        parse_quote!(#runtime::report::banner(#name);),
        parse_quote!(#runtime::report::failures_header(#name);),
    ];
    block.stmts.splice(0..0, header);
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;
    use quote::ToTokens;

    use super::*;
    use crate::config::MacroConfig;

    fn rendered(stmt: &Stmt) -> String {
        stmt.to_token_stream().to_string()
    }

    fn config(strict: bool) -> ResolvedConfig {
        MacroConfig {
            strict,
            ..MacroConfig::default()
        }
        .resolve(&parse_quote!(f))
    }

    #[test]
    fn statements_are_ordered_around_the_body() {
        let mut block: Block = parse_quote!({
            work();
        });
        let config = config(false);
        inject_counters(&mut block, &config);
        inject_report(&mut block, &config, &Ident::new("guard", Span::mixed_site()));

        let stmts: Vec<String> = block.stmts.iter().map(rendered).collect();
        assert_eq!(stmts.len(), 6);
        assert!(stmts[0].contains("report :: banner (\"f\")"));
        assert!(stmts[1].contains("report :: failures_header (\"f\")"));
        assert!(stmts[2].starts_with("let num_tests = & :: assertest :: Counter :: new ()"));
        assert!(stmts[3].starts_with("let num_passes = & :: assertest :: Counter :: new ()"));
        assert!(stmts[4].contains("SummaryGuard :: new (\"f\" , num_tests , num_passes)"));
        assert!(!stmts[4].contains("strict"));
        assert_eq!(stmts[5], "work () ;");
    }

    #[test]
    fn strict_guard_is_requested() {
        let mut block: Block = parse_quote!({});
        let config = config(true);
        inject_counters(&mut block, &config);
        inject_report(&mut block, &config, &Ident::new("guard", Span::mixed_site()));
        assert!(rendered(&block.stmts[4]).ends_with(". strict () ;"));
    }
}

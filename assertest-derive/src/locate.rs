//! Finds the function and every assertion inside it.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{Item, ItemFn, Macro, MacroDelimiter, spanned::Spanned, visit::Visit};

use crate::error::{TransformError, TransformResult};

/// Macros rewritten into checks, matched on the last path segment.
pub const ASSERTION_MACROS: &[&str] = &["assert", "assert_eq", "assert_ne"];

pub fn is_assertion(mac: &Macro) -> bool {
    mac.path
        .segments
        .last()
        .is_some_and(|segment| ASSERTION_MACROS.iter().any(|name| segment.ident == name))
}

/// One assertion, as it appears in the source.
#[derive(Debug, Clone)]
pub struct AssertionRecord {
    /// Position among the function's assertions, in source order.
    pub index: usize,
    /// The whole invocation, `path!(args)`.
    pub tokens: TokenStream,
    /// Literal source text of the invocation, printed when the check fails.
    pub text: String,
    /// Span of the macro path, which sits on the assertion's first line.
    pub span: Span,
}

impl AssertionRecord {
    fn new(index: usize, mac: &Macro) -> Self {
        Self {
            index,
            tokens: mac.to_token_stream(),
            text: literal_text(mac),
            span: mac.path.span(),
        }
    }
}

/// Join the lines of a multi-line invocation into one line, each trimmed.
fn collapse_lines(source: &str) -> String {
    let mut text = String::new();
    for line in source.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let glued =
            text.ends_with(['(', '[', '{']) || line.starts_with([')', ']', '}', ',', '.']);
        if !text.is_empty() && !glued {
            text.push(' ');
        }
        text.push_str(line);
    }
    text
}

/// The invocation's text as the user wrote it, e.g. `assert_eq!(x, 3)`.
///
/// The arguments come from the source text behind the delimited group. When the compiler
/// cannot provide it, the tokens are rendered instead.
pub fn literal_text(mac: &Macro) -> String {
    let mut path = mac
        .path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if mac.path.leading_colon.is_some() {
        path.insert_str(0, "::");
    }

    let arguments = mac
        .delimiter
        .span()
        .join()
        .source_text()
        .unwrap_or_else(|| {
            let (open, close) = match mac.delimiter {
                MacroDelimiter::Paren(_) => ('(', ')'),
                MacroDelimiter::Brace(_) => ('{', '}'),
                MacroDelimiter::Bracket(_) => ('[', ']'),
            };
            format!("{open}{}{close}", mac.tokens)
        });
    collapse_lines(&format!("{path}!{arguments}"))
}

pub struct Located {
    pub function: ItemFn,
    pub records: Vec<AssertionRecord>,
}

struct Collector {
    records: Vec<AssertionRecord>,
}

impl Collector {
    fn push(&mut self, mac: &Macro) {
        if is_assertion(mac) {
            let index = self.records.len();
            self.records.push(AssertionRecord::new(index, mac));
        }
    }
}

impl<'ast> Visit<'ast> for Collector {
    // Nested items cannot see the enclosing function's counters.
    fn visit_item(&mut self, _: &'ast Item) {}

    fn visit_stmt_macro(&mut self, node: &'ast syn::StmtMacro) {
        self.push(&node.mac);
    }

    fn visit_expr_macro(&mut self, node: &'ast syn::ExprMacro) {
        self.push(&node.mac);
    }

    // Inline `const` blocks are evaluated at compile time, where panics cannot be caught.
    fn visit_expr_const(&mut self, _: &'ast syn::ExprConst) {}
}

fn describe(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "a `const` item",
        Item::Enum(_) => "an `enum`",
        Item::ExternCrate(_) => "an `extern crate`",
        Item::ForeignMod(_) => "an `extern` block",
        Item::Impl(_) => "an `impl` block",
        Item::Macro(_) => "a macro invocation",
        Item::Mod(_) => "a module",
        Item::Static(_) => "a `static` item",
        Item::Struct(_) => "a `struct`",
        Item::Trait(_) => "a trait",
        Item::TraitAlias(_) => "a trait alias",
        Item::Type(_) => "a type alias",
        Item::Union(_) => "a `union`",
        Item::Use(_) => "a `use` declaration",
        _ => "an unsupported item",
    }
}

/// Parse `item` as a function and collect its assertions in source order.
pub fn locate(item: TokenStream) -> TransformResult<Located> {
    let function = match syn::parse2::<Item>(item)? {
        Item::Fn(function) => function,
        other => {
            return Err(TransformError::NotAFunction {
                span: other.span(),
                found: describe(&other).to_string(),
            });
        }
    };
    if let Some(constness) = &function.sig.constness {
        return Err(TransformError::NotAFunction {
            span: constness.span,
            found: "a `const fn`, which cannot catch panics".to_string(),
        });
    }

    let mut collector = Collector {
        records: Vec::new(),
    };
    collector.visit_block(&function.block);
    Ok(Located {
        function,
        records: collector.records,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn texts(located: &Located) -> Vec<&str> {
        located
            .records
            .iter()
            .map(|record| record.text.as_str())
            .collect()
    }

    #[test]
    fn assertions_are_collected_in_source_order() {
        let located = locate(quote! {
            fn f(values: &[u32]) {
                assert!(true);
                let x = 3;
                assert_eq!(x, 3);
                if x > 1 {
                    assert_ne!(x, 1);
                }
                for v in values {
                    std::assert!(*v > 0);
                }
            }
        })
        .unwrap();

        assert_eq!(texts(&located).len(), 4);
        assert!(texts(&located)[0].starts_with("assert!("));
        assert!(texts(&located)[1].starts_with("assert_eq!("));
        assert!(texts(&located)[2].starts_with("assert_ne!("));
        assert!(texts(&located)[3].starts_with("std::assert!("));
        for (position, record) in located.records.iter().enumerate() {
            assert_eq!(record.index, position);
        }
    }

    #[test]
    fn expression_position_and_closures_are_collected() {
        let located = locate(quote! {
            fn f(x: Option<u8>) {
                let check = |v: u8| assert!(v < 10);
                match x {
                    Some(v) => assert_eq!(v, 1),
                    None => {}
                }
                check(1)
            }
        })
        .unwrap();
        assert_eq!(located.records.len(), 2);
    }

    #[test]
    fn nested_items_and_other_macros_are_skipped() {
        let located = locate(quote! {
            fn f() {
                fn helper() {
                    assert!(false);
                }
                println!("{}", 1);
                debug_assert!(false);
                let v = vec![1, 2];
                assert!(v.len() == 2);
            }
        })
        .unwrap();
        assert_eq!(located.records.len(), 1);
    }

    #[test]
    fn inline_const_blocks_are_skipped() {
        let located = locate(quote! {
            fn f() {
                const { assert!(1 < 2) };
                assert!(true);
            }
        })
        .unwrap();
        assert_eq!(located.records.len(), 1);
    }

    #[test]
    fn rendered_text_is_used_without_source() {
        let located = locate(quote! {
            fn f() {
                assert!(false);
                ::core::assert!(true);
            }
        })
        .unwrap();
        assert_eq!(texts(&located), vec!["assert!(false)", "::core::assert!(true)"]);
    }

    #[test]
    fn multi_line_invocations_collapse_to_one_line() {
        assert_eq!(collapse_lines("assert!(\n        false\n    )"), "assert!(false)");
        assert_eq!(
            collapse_lines("assert_eq!(\n    compute(1),\n    3\n)"),
            "assert_eq!(compute(1), 3)"
        );
        assert_eq!(
            collapse_lines("assert!(values\n    .iter()\n    .all(|v| *v > 0))"),
            "assert!(values.iter().all(|v| *v > 0))"
        );
        assert_eq!(collapse_lines("  assert!(x == 1)  "), "assert!(x == 1)");
    }

    #[test]
    fn non_functions_are_rejected() {
        let error = locate(quote!(struct S;)).err().unwrap();
        assert!(error.is_not_a_function());
        assert!(error.to_string().contains("a `struct`"));
    }

    #[test]
    fn const_fn_is_rejected() {
        let error = locate(quote!(const fn f() {})).err().unwrap();
        assert!(error.is_not_a_function());
    }

    #[test]
    fn syntax_errors_pass_through() {
        let error = locate(quote!(fn f() -> {})).err().unwrap();
        assert!(error.is_syntax());
    }
}

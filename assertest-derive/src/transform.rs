//! Rewrites each assertion into a guarded block.
//!
//! ```text
//! assert!(cond);
//! ```
//!
//! becomes
//!
//! ```text
//! {
//!     match ::assertest::guard::protect(|| { assert!(cond); }) {
//!         Ok(()) => passed.increment(),
//!         Err(failure) => ::assertest::report::failure("f", &CheckSite { .. }, &failure),
//!     }
//!     total.increment();
//! }
//! ```

use proc_macro2::Span;
use quote::quote_spanned;
use syn::{Block, Expr, Item, LitStr, Macro, Stmt, parse_quote, visit_mut::VisitMut};

use crate::{
    config::ResolvedConfig,
    error::{TransformError, TransformResult},
    locate::{AssertionRecord, is_assertion},
};

pub struct AssertTransformer<'a> {
    records: &'a [AssertionRecord],
    config: &'a ResolvedConfig,
    /// Span of the function's `fn` keyword; failure lines are counted from it.
    fn_span: Span,
    cursor: usize,
}

impl<'a> AssertTransformer<'a> {
    pub fn new(records: &'a [AssertionRecord], config: &'a ResolvedConfig, fn_span: Span) -> Self {
        Self {
            records,
            config,
            fn_span,
            cursor: 0,
        }
    }

    /// Rewrite `block` and check that every located assertion was consumed exactly once.
    pub fn transform(mut self, block: &mut Block) -> TransformResult<()> {
        self.visit_block_mut(block);
        if self.cursor != self.records.len() {
            return Err(TransformError::RecordMismatch {
                span: self.fn_span,
                located: self.records.len(),
                visited: self.cursor,
            });
        }
        Ok(())
    }

    /// Take the record for the next visited assertion, advancing the cursor.
    fn next_record(&mut self) -> Option<&'a AssertionRecord> {
        let record = self.records.get(self.cursor);
        self.cursor += 1;
        record
    }

    fn guarded_block(&self, record: &AssertionRecord) -> Expr {
        let ResolvedConfig {
            name,
            total,
            passed,
            runtime,
            ..
        } = self.config;
        let tokens = &record.tokens;
        let text = LitStr::new(&record.text, record.span);
        let origin = quote_spanned!(self.fn_span=> ::core::line!());
        let line = quote_spanned!(record.span=> ::core::line!());

        parse_quote! {
            {
                match #runtime::guard::protect(|| {
                    #tokens;
                }) {
                    ::core::result::Result::Ok(()) => #passed.increment(),
                    ::core::result::Result::Err(failure) => #runtime::report::failure(
                        #name,
                        &#runtime::report::CheckSite {
                            origin: #origin,
                            line: #line,
                            text: #text,
                        },
                        &failure,
                    ),
                }
                #total.increment();
            }
        }
    }

    fn replace(&mut self, mac: &Macro) -> Option<Expr> {
        if !is_assertion(mac) {
            return None;
        }
        let record = self.next_record()?;
        debug_assert_eq!(record.index + 1, self.cursor);
        Some(self.guarded_block(record))
    }
}

impl VisitMut for AssertTransformer<'_> {
    fn visit_item_mut(&mut self, _: &mut Item) {}

    fn visit_expr_const_mut(&mut self, _: &mut syn::ExprConst) {}

    fn visit_stmt_mut(&mut self, node: &mut Stmt) {
        if let Stmt::Macro(stmt) = node {
            if let Some(guarded) = self.replace(&stmt.mac) {
                *node = Stmt::Expr(guarded, None);
            }
            return;
        }
        syn::visit_mut::visit_stmt_mut(self, node);
    }

    fn visit_expr_mut(&mut self, node: &mut Expr) {
        if let Expr::Macro(expr) = node {
            if let Some(guarded) = self.replace(&expr.mac) {
                *node = guarded;
            }
            return;
        }
        syn::visit_mut::visit_expr_mut(self, node);
    }
}

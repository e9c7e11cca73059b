//! Runs the whole rewrite and emits the resulting function.

use proc_macro2::{Ident, Span, TokenStream};
use quote::ToTokens;
use syn::ItemFn;

use crate::{
    config::MacroConfig,
    error::TransformResult,
    inject::{inject_counters, inject_report},
    locate::locate,
    sanitize::sanitize,
    transform::AssertTransformer,
};

/// Put the rewritten body back into the function.
///
/// Name, attributes, visibility and signature are left exactly as written, so callers see
/// the same function. Every local the rewrite introduces is either mixed-site hygienic or
/// named by the user, and the runtime is reached through an absolute path.
pub fn rebind(mut function: ItemFn, body: syn::Block) -> TokenStream {
    *function.block = body;
    function.into_token_stream()
}

/// Expand `#[assert_tests(<args>)]` applied to `item`.
pub fn expand(args: TokenStream, item: TokenStream) -> TransformResult<TokenStream> {
    let config = MacroConfig::parse(args)?;
    let located = locate(item)?;
    let mut function = located.function;
    sanitize(&mut function);

    let config = config.resolve(&function.sig.ident);
    let mut body = (*function.block).clone();
    inject_counters(&mut body, &config);
    AssertTransformer::new(&located.records, &config, function.sig.fn_token.span)
        .transform(&mut body)?;
    inject_report(
        &mut body,
        &config,
        &Ident::new("__assertest_summary", Span::mixed_site()),
    );

    Ok(rebind(function, body))
}

//! `check!(suite, <check>)`: registers a check with a `Suite`, labelled with its own text.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote, quote_spanned};
use syn::{
    Expr, LitStr, Token,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

use crate::locate::literal_text;

pub struct CheckInput {
    suite: Expr,
    check: Expr,
}

impl Parse for CheckInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let suite = input.parse()?;
        input.parse::<Token![,]>()?;
        let check = input.parse()?;
        input.parse::<Option<Token![,]>>()?;
        Ok(CheckInput { suite, check })
    }
}

impl CheckInput {
    fn label(&self) -> String {
        match &self.check {
            Expr::Macro(expr) => literal_text(&expr.mac),
            other => other.to_token_stream().to_string(),
        }
    }

    pub fn expand(&self) -> TokenStream {
        let CheckInput { suite, check } = self;
        let label = LitStr::new(&self.label(), check.span());
        let line = quote_spanned!(check.span()=> ::core::line!());
        quote! {
            #suite.check_at(#label, #line, || {
                #check;
            })
        }
    }
}

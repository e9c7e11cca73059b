//! Arguments of the `#[assert_tests(...)]` attribute.

use proc_macro2::{Span, TokenStream};
use syn::{
    Ident, LitStr, Path, meta::ParseNestedMeta, parse::Parser, parse_quote, spanned::Spanned,
};

use crate::error::TransformError;

const DEFAULT_TOTAL: &str = "num_tests";
const DEFAULT_PASSED: &str = "num_passes";

/// Options as written by the user.
#[derive(Default)]
pub struct MacroConfig {
    pub name: Option<LitStr>,
    pub total: Option<Ident>,
    pub passed: Option<Ident>,
    pub runtime: Option<Path>,
    pub strict: bool,
}

/// Options with every default filled in for one function.
pub struct ResolvedConfig {
    /// Name printed in the banner and the summary.
    pub name: LitStr,
    pub total: Ident,
    pub passed: Ident,
    /// Path of the runtime crate, `::assertest` unless overridden.
    pub runtime: Path,
    pub strict: bool,
}

fn set_once<T>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    option: &str,
    value: T,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(TransformError::DuplicateOption {
            span: meta.path.span(),
            option: option.to_string(),
        }
        .into());
    }
    *slot = Some(value);
    Ok(())
}

impl MacroConfig {
    pub fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut config = MacroConfig::default();
        let mut strict_seen = false;

        let parser = syn::meta::parser(|meta| {
            let span = meta.path.span();
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                set_once(&mut config.name, &meta, "name", value)
            } else if meta.path.is_ident("total") {
                let value: Ident = meta.value()?.parse()?;
                set_once(&mut config.total, &meta, "total", value)
            } else if meta.path.is_ident("passed") {
                let value: Ident = meta.value()?.parse()?;
                set_once(&mut config.passed, &meta, "passed", value)
            } else if meta.path.is_ident("crate") {
                let literal: LitStr = meta.value()?.parse()?;
                let path = literal.parse::<Path>().map_err(|error| {
                    TransformError::InvalidOption {
                        span: literal.span(),
                        option: "crate".to_string(),
                        reason: error.to_string(),
                    }
                })?;
                set_once(&mut config.runtime, &meta, "crate", path)
            } else if meta.path.is_ident("strict") {
                if strict_seen {
                    return Err(TransformError::DuplicateOption {
                        span,
                        option: "strict".to_string(),
                    }
                    .into());
                }
                strict_seen = true;
                config.strict = true;
                Ok(())
            } else {
                let option = meta
                    .path
                    .segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                Err(TransformError::UnknownOption { span, option }.into())
            }
        });
        parser.parse2(args)?;

        if let (Some(total), Some(passed)) = (&config.total, &config.passed) {
            if total == passed {
                return Err(TransformError::InvalidOption {
                    span: passed.span(),
                    option: "passed".to_string(),
                    reason: "the two counters need distinct names".to_string(),
                }
                .into());
            }
        }
        Ok(config)
    }

    /// Fill in defaults for the function named `function`.
    ///
    /// Default counter names are mixed-site hygienic, so the function body can neither
    /// see nor shadow them. Names given by the user resolve like any identifier the user
    /// wrote, and avoiding clashes with them is up to the user.
    pub fn resolve(self, function: &Ident) -> ResolvedConfig {
        ResolvedConfig {
            name: self
                .name
                .unwrap_or_else(|| LitStr::new(&function.to_string(), function.span())),
            total: self
                .total
                .unwrap_or_else(|| Ident::new(DEFAULT_TOTAL, Span::mixed_site())),
            passed: self
                .passed
                .unwrap_or_else(|| Ident::new(DEFAULT_PASSED, Span::mixed_site())),
            runtime: self.runtime.unwrap_or_else(|| parse_quote!(::assertest)),
            strict: self.strict,
        }
    }
}

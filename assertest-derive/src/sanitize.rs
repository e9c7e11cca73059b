use syn::{Attribute, ItemFn};

const SELF_ATTRIBUTE: &str = "assert_tests";

fn is_self_attribute(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == SELF_ATTRIBUTE)
}

/// Drop every remaining `#[assert_tests]` from `function` so the rewrite is applied once.
///
/// The compiler already removed the invocation being expanded; this only catches
/// repeated annotations.
pub fn sanitize(function: &mut ItemFn) {
    function.attrs.retain(|attr| !is_self_attribute(attr));
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn repeated_annotations_are_removed() {
        let mut function: ItemFn = parse_quote! {
            #[assert_tests]
            #[test]
            #[assertest::assert_tests(strict)]
            fn f() {}
        };
        sanitize(&mut function);
        assert_eq!(function.attrs.len(), 1);
        assert!(function.attrs[0].path().is_ident("test"));
    }

    #[test]
    fn other_attributes_are_kept() {
        let mut function: ItemFn = parse_quote! {
            #[inline]
            #[allow(unused)]
            fn f() {}
        };
        sanitize(&mut function);
        assert_eq!(function.attrs.len(), 2);
        assert!(function.attrs[0].path().is_ident("inline"));
    }
}

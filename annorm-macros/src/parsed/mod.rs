#[allow(unused_imports)]
use super::*;

mod entity;
mod field;
mod serde_names;

pub(crate) use entity::ParsedEntity;
pub(crate) use field::ParsedField;

/// Join the `///` lines of an item into one metadata block, one line each.
pub(crate) fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(text), .. }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() { None } else { Some(lines.join("\n")) }
}

pub(crate) fn optional_lit(text: &Option<String>) -> TokenStream2 {
    match text {
        Some(text) => {
            let lit = LitStr::new(text, Span::call_site());
            quote! { ::std::option::Option::Some(#lit) }
        }
        None => quote! { ::std::option::Option::None },
    }
}

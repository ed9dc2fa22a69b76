use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta, Result, parse_macro_input};

mod parsed;

use parsed::ParsedEntity;

/// Derive `annorm::Entity` from doc-comment annotations.
///
/// The struct's doc comment is the type metadata (`@table=...`); each field's
/// doc comment is that field's metadata (`@type=...`, `@pkey`, ...). Fields
/// marked `#[annorm(skip)]` are declared static and never mapped.
///
/// ```text
/// /// @table=guestbook
/// #[derive(Entity, Serialize, Default)]
/// struct GuestbookRecord {
///     /// @type=integer
///     /// @pkey
///     id: Option<i64>,
///     /// @type=string
///     message: Option<String>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(annorm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedEntity::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}

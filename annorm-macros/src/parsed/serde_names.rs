//! The key serde writes each field under, so the mapper can find its value.

use proc_macro2::TokenStream as TokenStream2;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, LitStr, Result, Token};

/// Value of a `#[serde(...)]` option such as `rename` or `rename_all`.
///
/// Accepts both `option = "x"` and `option(serialize = "x", ...)`. Malformed
/// serde attributes are left for serde's own derive to report.
pub(crate) fn serde_option(attrs: &[Attribute], option: &str) -> Option<String> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident(option) {
                return skip_value(&meta);
            }
            if meta.input.peek(Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                found = Some(value.value());
                return Ok(());
            }
            meta.parse_nested_meta(|direction| {
                let value: LitStr = direction.value()?.parse()?;
                if direction.path.is_ident("serialize") {
                    found = Some(value.value());
                }
                Ok(())
            })
        });
    }
    found
}

fn skip_value(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream2>()?;
    }
    Ok(())
}

/// Apply a container `rename_all` rule to a snake_case field name.
/// Unrecognised rules leave the name alone.
pub(crate) fn apply_rename_all(rule: &str, field: &str) -> String {
    match rule {
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "PascalCase" => pascal_case(field),
        "camelCase" => {
            let pascal = pascal_case(field);
            let mut chars = pascal.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => pascal,
            }
        }
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        _ => field.to_string(),
    }
}

fn pascal_case(field: &str) -> String {
    let mut pascal = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn reads_plain_and_directional_renames() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(default, rename = "mail")])];
        assert_eq!(serde_option(&attrs, "rename").as_deref(), Some("mail"));

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename(deserialize = "in", serialize = "out"))])];
        assert_eq!(serde_option(&attrs, "rename").as_deref(), Some("out"));

        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(skip_serializing_if = "Option::is_none", with = "x")]),
            parse_quote!(#[doc = "not serde"]),
        ];
        assert_eq!(serde_option(&attrs, "rename"), None);
    }

    #[test]
    fn rename_all_rules() {
        assert_eq!(apply_rename_all("camelCase", "display_name"), "displayName");
        assert_eq!(apply_rename_all("PascalCase", "display_name"), "DisplayName");
        assert_eq!(apply_rename_all("kebab-case", "display_name"), "display-name");
        assert_eq!(apply_rename_all("SCREAMING_SNAKE_CASE", "display_name"), "DISPLAY_NAME");
        assert_eq!(apply_rename_all("SCREAMING-KEBAB-CASE", "display_name"), "DISPLAY-NAME");
        assert_eq!(apply_rename_all("lowercase", "display_name"), "display_name");
        assert_eq!(apply_rename_all("snake_case", "id"), "id");
    }
}

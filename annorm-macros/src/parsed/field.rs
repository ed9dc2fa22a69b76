#[allow(unused_imports)]
use super::*;
use super::serde_names::{apply_rename_all, serde_option};

pub(crate) struct ParsedField {
    pub(crate) ident: Ident,
    pub(crate) metadata: Option<String>,
    pub(crate) skip: bool,
    /// `#[serde(rename = "...")]`, which wins over the container rule.
    pub(crate) rename: Option<String>,
}

impl ParsedField {
    pub(crate) fn from_field(field: &syn::Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(Span::call_site(), "Entity requires named fields"))?;

        let mut skip = false;
        for attr in &field.attrs {
            if attr.path().is_ident("annorm") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown annorm field option, expected `skip`"))
                    }
                })?;
            }
        }

        Ok(Self {
            ident,
            metadata: doc_text(&field.attrs),
            skip,
            rename: serde_option(&field.attrs, "rename"),
        })
    }

    /// Serialized field name: raw identifiers lose their `r#` prefix.
    pub(crate) fn name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
    }

    /// Key serde writes this field under.
    pub(crate) fn key(&self, rename_all: Option<&str>) -> String {
        match (&self.rename, rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => apply_rename_all(rule, &self.name()),
            (None, None) => self.name(),
        }
    }

    pub(crate) fn to_declaration_tokens(&self, rename_all: Option<&str>) -> TokenStream2 {
        let name = self.name();
        let key = self.key(rename_all);
        let metadata = optional_lit(&self.metadata);
        let name_lit = LitStr::new(&name, self.ident.span());
        if self.skip {
            quote! { .static_field(#name_lit, #metadata) }
        } else if key != name {
            let key_lit = LitStr::new(&key, self.ident.span());
            quote! { .renamed_field(#name_lit, #key_lit, #metadata) }
        } else {
            quote! { .field(#name_lit, #metadata) }
        }
    }
}

#[allow(unused_imports)]
use super::*;
use super::serde_names::serde_option;

pub(crate) struct ParsedEntity {
    name: Ident,
    metadata: Option<String>,
    fields: Vec<ParsedField>,
    generics: syn::Generics,
    rename_all: Option<String>,
}

impl ParsedEntity {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        for attr in &input.attrs {
            if attr.path().is_ident("annorm") {
                return Err(Error::new_spanned(
                    attr,
                    "annorm options belong on fields; put entity metadata in the doc comment",
                ));
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut parsed = Vec::new();
                    for field in &named.named {
                        parsed.push(ParsedField::from_field(field)?);
                    }
                    parsed
                }
                _ => return Err(Error::new(input.ident.span(), "Entity requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "Entity can only be derived for structs")),
        };

        Ok(Self {
            name: input.ident.clone(),
            metadata: doc_text(&input.attrs),
            fields,
            generics: input.generics.clone(),
            rename_all: serde_option(&input.attrs, "rename_all"),
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let name_lit = LitStr::new(&name.to_string(), name.span());
        let metadata = optional_lit(&self.metadata);
        let rename_all = self.rename_all.as_deref();
        let field_decls = self.fields.iter().map(|field| field.to_declaration_tokens(rename_all));
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let descriptor_impl = quote! {
            impl #impl_generics ::annorm::types::Entity for #name #ty_generics #where_clause {
                fn type_descriptor() -> ::annorm::types::TypeDescriptor {
                    ::annorm::types::TypeDescriptor::new(#name_lit, #metadata)
                        #(#field_decls)*
                }
            }
        };

        // Generic entities cannot name a single TypeId, so only concrete
        // types take part in registration.
        if !self.generics.params.is_empty() {
            return descriptor_impl;
        }

        quote! {
            #descriptor_impl

            ::annorm::inventory::submit! {
                ::annorm::registration::EntityRegistration {
                    type_id: ::std::any::TypeId::of::<#name>,
                    type_name: #name_lit,
                    descriptor_fn: <#name as ::annorm::types::Entity>::type_descriptor,
                }
            }
        }
    }
}

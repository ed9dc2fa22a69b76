//! Rust source file parser using syn to rebuild Entity type descriptors.

use anyhow::{Context, Result};
use annorm::TypeDescriptor;
use std::path::Path;
use syn::{Attribute, Expr, ExprLit, Fields, Lit, Meta};

/// A struct deriving Entity, as found in a source file.
#[derive(Debug, Clone)]
pub struct ScannedEntity {
    pub descriptor: TypeDescriptor,
    /// Path relative to project root
    pub file: String,
    pub line: usize,
}

/// Parse a Rust file and extract all Entity definitions.
///
/// # Arguments
/// * `path` - Absolute path to the Rust source file
/// * `relative_path` - Path relative to project root for display
pub fn parse_entity_file(path: &Path, relative_path: &str) -> Result<Vec<ScannedEntity>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_entity_source(&content, relative_path)
        .with_context(|| format!("Failed to parse Rust file: {}", path.display()))
}

fn parse_entity_source(content: &str, relative_path: &str) -> Result<Vec<ScannedEntity>> {
    let syntax = syn::parse_file(content)?;
    let lines: Vec<&str> = content.lines().collect();

    let mut entities = Vec::new();
    collect_items(&syntax.items, &lines, relative_path, &mut entities);
    Ok(entities)
}

/// Walk items, descending into inline modules.
fn collect_items(items: &[syn::Item], lines: &[&str], relative_path: &str, out: &mut Vec<ScannedEntity>) {
    for item in items {
        match item {
            syn::Item::Struct(item_struct) if has_entity_derive(&item_struct.attrs) => {
                let name = item_struct.ident.to_string();
                out.push(ScannedEntity {
                    descriptor: descriptor_for(item_struct),
                    file: relative_path.to_string(),
                    line: find_struct_line(lines, &name).unwrap_or(1),
                });
            }
            syn::Item::Mod(module) => {
                if let Some((_, inner)) = &module.content {
                    collect_items(inner, lines, relative_path, out);
                }
            }
            _ => {}
        }
    }
}

/// Find the line number where a struct is defined
fn find_struct_line(lines: &[&str], struct_name: &str) -> Option<usize> {
    let pattern = format!("struct {struct_name}");
    lines
        .iter()
        .position(|line| {
            line.find(&pattern).is_some_and(|at| {
                let rest = &line[at + pattern.len()..];
                !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_')
            })
        })
        .map(|index| index + 1)
}

/// Check if attributes include derive(Entity) or derive(annorm::Entity)
fn has_entity_derive(attrs: &[Attribute]) -> bool {
    for attr in attrs {
        if attr.path().is_ident("derive")
            && let Ok(nested) = attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
            )
        {
            for path in nested {
                if path.segments.last().is_some_and(|segment| segment.ident == "Entity") {
                    return true;
                }
            }
        }
    }
    false
}

fn descriptor_for(item: &syn::ItemStruct) -> TypeDescriptor {
    let type_doc = doc_text(&item.attrs);
    let mut descriptor = TypeDescriptor::new(item.ident.to_string(), type_doc.as_deref());

    if let Fields::Named(fields) = &item.fields {
        for field in &fields.named {
            let Some(ident) = &field.ident else { continue };
            let raw = ident.to_string();
            let name = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
            let doc = doc_text(&field.attrs);
            descriptor = if is_skipped(&field.attrs) {
                descriptor.static_field(name, doc.as_deref())
            } else {
                descriptor.field(name, doc.as_deref())
            };
        }
    }

    descriptor
}

/// Whether a field carries #[annorm(skip)]
fn is_skipped(attrs: &[Attribute]) -> bool {
    attrs.iter().filter(|attr| attr.path().is_ident("annorm")).any(|attr| {
        let mut skip = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            }
            Ok(())
        });
        skip
    })
}

/// Join the doc comment lines of an item, one line each.
fn doc_text(attrs: &[Attribute]) -> Option<String> {
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

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
        use annorm::Entity;

        /// @table=guestbook
        #[derive(Debug, Entity, Serialize)]
        pub struct GuestbookRecord {
            /// @type=integer
            /// @pkey
            pub id: Option<i64>,
            /// @type=string
            pub message: Option<String>,
            #[annorm(skip)]
            pub cache: Option<String>,
        }

        #[derive(Debug)]
        struct NotAnEntity {
            /// @type=string
            name: String,
        }

        mod nested {
            /// @table=notes
            #[derive(annorm::Entity)]
            struct Note {
                /// @type=string
                r#type: String,
            }
        }
    "#;

    #[test]
    fn finds_entities_with_descriptors() {
        let entities = parse_entity_source(SOURCE, "src/models.rs").unwrap();
        assert_eq!(entities.len(), 2);

        let guestbook = &entities[0];
        assert_eq!(guestbook.descriptor.type_name, "GuestbookRecord");
        assert_eq!(guestbook.descriptor.metadata.as_deref(), Some(" @table=guestbook"));
        assert_eq!(guestbook.descriptor.fields.len(), 3);
        assert_eq!(guestbook.descriptor.fields[0].metadata.as_deref(), Some(" @type=integer\n @pkey"));
        assert!(guestbook.descriptor.fields[2].is_static);
        assert_eq!(guestbook.file, "src/models.rs");
        assert_eq!(guestbook.line, 6);

        let note = &entities[1];
        assert_eq!(note.descriptor.type_name, "Note");
        assert_eq!(note.descriptor.fields[0].name, "type");
    }

    #[test]
    fn struct_line_matches_whole_name() {
        let lines = vec!["struct GuestbookRecordExt {", "struct GuestbookRecord {"];
        assert_eq!(find_struct_line(&lines, "GuestbookRecord"), Some(2));
    }

    #[test]
    fn invalid_source_is_an_error() {
        assert!(parse_entity_source("struct {", "broken.rs").is_err());
    }
}

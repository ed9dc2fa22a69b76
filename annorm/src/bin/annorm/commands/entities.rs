use std::path::PathBuf;

use annorm::{EntityMapper, FieldDescriptor, SerializerRegistry, TypeDescriptor};
use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::examples::ExampleGroup;
use crate::output::{FAILED_MARK, OutputManager, PRIMARY_KEY_MARK, TableDisplay};
use crate::scanner::ScannedEntity;

use super::{project_context, scan_project};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "List Entities",
        commands: &[
            "annorm entities                   # All entities in the current project",
            "annorm entities GuestbookRecord   # A single entity",
            "annorm entities --path ../shop    # Another project",
        ],
    },
    ExampleGroup {
        title: "Scripting",
        commands: &["annorm --output json entities   # Machine-readable mapping report"],
    },
];

#[derive(Args)]
pub struct EntitiesArgs {
    /// Entity type name to show (shows all if omitted)
    pub name: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Mapping of one scanned entity.
#[derive(Debug, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub file: String,
    pub line: usize,
    pub table: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    pub error: Option<String>,
}

impl EntityReport {
    pub fn from_descriptor(descriptor: TypeDescriptor, file: String, line: usize) -> Self {
        let name = descriptor.type_name.clone();
        match EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, SerializerRegistry::global()) {
            Ok(mapper) => Self {
                name,
                file,
                line,
                table: mapper.table_name().ok().map(str::to_string),
                fields: mapper.descriptors(),
                error: None,
            },
            Err(err) => Self {
                name,
                file,
                line,
                table: None,
                fields: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl From<ScannedEntity> for EntityReport {
    fn from(entity: ScannedEntity) -> Self {
        Self::from_descriptor(entity.descriptor, entity.file, entity.line)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct EntityListing(pub Vec<EntityReport>);

impl TableDisplay for EntityListing {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Entity", "Field", "Column", "Table", "Serializer", "Key"]);

        for report in &self.0 {
            if let Some(error) = &report.error {
                table.add_row(vec![
                    Cell::new(&report.name),
                    Cell::new(format!("{FAILED_MARK} {error}")),
                ]);
                continue;
            }
            if report.fields.is_empty() {
                table.add_row(vec![Cell::new(&report.name), Cell::new("(no mapped fields)")]);
                continue;
            }
            for (index, field) in report.fields.iter().enumerate() {
                let entity = if index == 0 { report.name.as_str() } else { "" };
                table.add_row(vec![
                    Cell::new(entity),
                    Cell::new(&field.field),
                    Cell::new(&field.column),
                    Cell::new(field.table.as_deref().unwrap_or("?")),
                    Cell::new(&field.serializer),
                    Cell::new(if field.primary_key { PRIMARY_KEY_MARK } else { "" }),
                ]);
            }
        }

        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|report| match &report.error {
                Some(error) => format!("{}: error: {error}", report.name),
                None => {
                    let columns: Vec<&str> = report.fields.iter().map(|f| f.column.as_str()).collect();
                    format!(
                        "{} ({}): {}",
                        report.name,
                        report.table.as_deref().unwrap_or("?"),
                        columns.join(", ")
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn handle_entities(args: EntitiesArgs, output: &OutputManager) -> Result<()> {
    let ctx = project_context(args.path)?;
    output.verbose(&format!("project root: {}", ctx.project_root.display()));

    let mut scanned = scan_project(&ctx, output)?;
    if let Some(name) = &args.name {
        scanned.retain(|entity| &entity.descriptor.type_name == name);
        if scanned.is_empty() {
            anyhow::bail!("Entity '{name}' not found");
        }
    }

    if scanned.is_empty() {
        output.info("No #[derive(Entity)] structs found.");
        return Ok(());
    }

    let listing = EntityListing(scanned.into_iter().map(EntityReport::from).collect());
    output.heading("Entities");
    output.display(&listing)?;

    let failures = listing.0.iter().filter(|report| report.error.is_some()).count();
    if failures == 0 {
        output.success(&format!("{} entity(ies) mapped", listing.0.len()));
    } else {
        output.warning(&format!("{failures} entity(ies) failed to map"));
        for report in listing.0.iter().filter(|report| report.error.is_some()) {
            output.bullet(&format!("{} ({}:{})", report.name, report.file, report.line));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guestbook() -> TypeDescriptor {
        TypeDescriptor::new("GuestbookRecord", Some("@table=guestbook"))
            .field("id", Some("@type=integer @pkey"))
            .field("message", Some("@type=string"))
    }

    #[test]
    fn report_lists_mapped_fields() {
        let report = EntityReport::from_descriptor(guestbook(), "src/lib.rs".into(), 3);
        assert_eq!(report.table.as_deref(), Some("guestbook"));
        assert_eq!(report.fields.len(), 2);
        assert!(report.error.is_none());

        let listing = EntityListing(vec![report]);
        assert_eq!(listing.to_compact(), "GuestbookRecord (guestbook): id, message");
    }

    #[test]
    fn report_captures_configuration_errors() {
        let descriptor = TypeDescriptor::new("Flags", Some("@table=flags")).field("on", Some("@type=boolean"));
        let report = EntityReport::from_descriptor(descriptor, "src/lib.rs".into(), 1);
        assert!(report.error.as_deref().is_some_and(|e| e.contains("boolean")));
        assert!(report.fields.is_empty());
    }
}

use std::path::PathBuf;

use annorm::{AliasMap, EntityMapper, FieldSelector, SerializerRegistry};
use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

use super::{project_context, scan_project};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Render Assignments",
        commands: &[
            "annorm set GuestbookRecord -V id=42 -V 'message=Hello World!'",
            "annorm set GuestbookRecord -V id=42 --fields pkey",
            "annorm set GuestbookRecord -V message=Hi --fields message,title",
        ],
    },
    ExampleGroup {
        title: "Statements and Aliases",
        commands: &[
            "annorm set GuestbookRecord -V message=Hi --insert       # INSERT guestbook SET ...;",
            "annorm set GuestbookRecord -V message=Hi --alias guestbook=g",
        ],
    },
];

#[derive(Args)]
pub struct SetArgs {
    /// Entity type name
    pub entity: String,

    /// Field value as NAME=VALUE (JSON literals are parsed, anything else is text)
    #[arg(short = 'V', long = "value", value_name = "NAME=VALUE")]
    pub values: Vec<String>,

    /// Fields to include: all, pkey, except-pkey, or a comma-separated list
    #[arg(long, default_value = "except-pkey")]
    pub fields: String,

    /// Table alias as TABLE=ALIAS (overrides annorm.toml)
    #[arg(long = "alias", value_name = "TABLE=ALIAS")]
    pub aliases: Vec<String>,

    /// Wrap the fragment in an INSERT ... SET statement
    #[arg(long)]
    pub insert: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct SetResult {
    pub entity: String,
    pub table: Option<String>,
    pub set: String,
    pub statement: Option<String>,
}

impl TableDisplay for SetResult {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Entity", "SQL"]);
        let sql = self.statement.as_deref().unwrap_or(&self.set);
        table.add_row(vec![Cell::new(&self.entity), Cell::new(sql)]);
        table
    }

    fn to_compact(&self) -> String {
        self.statement.clone().unwrap_or_else(|| self.set.clone())
    }
}

/// Split `NAME=VALUE` at the first `=`.
pub fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("missing name in '{raw}'");
    }
    Ok((name.to_string(), value.to_string()))
}

/// JSON literals keep their type; everything else is text.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Every declared field starts as `null`; `NAME=VALUE` pairs overwrite it.
/// Returns the names that are not declared fields.
pub fn fill_record(record: &mut Map<String, Value>, declared: &[String], values: &[String]) -> Result<Vec<String>> {
    for name in declared {
        record.insert(name.clone(), Value::Null);
    }
    let mut unknown = Vec::new();
    for raw in values {
        let (name, value) = parse_pair(raw)?;
        if !declared.contains(&name) {
            unknown.push(name.clone());
        }
        record.insert(name, parse_value(&value));
    }
    Ok(unknown)
}

pub fn parse_selector(raw: &str) -> Result<FieldSelector> {
    Ok(match raw.trim() {
        "all" => FieldSelector::AllFields,
        "pkey" => FieldSelector::PrimaryKeyOnly,
        "except-pkey" => FieldSelector::AllExceptPrimaryKey,
        list => {
            let names: Vec<&str> = list.split(',').map(str::trim).filter(|name| !name.is_empty()).collect();
            if names.is_empty() {
                anyhow::bail!("no fields listed in '{raw}'");
            }
            FieldSelector::explicit(names)
        }
    })
}

pub fn handle_set(args: SetArgs, output: &OutputManager) -> Result<()> {
    let ctx = project_context(args.path.clone())?;

    let entity = scan_project(&ctx, output)?
        .into_iter()
        .find(|entity| entity.descriptor.type_name == args.entity)
        .with_context(|| format!("Entity '{}' not found", args.entity))?;
    output.verbose(&format!("{} defined at {}:{}", args.entity, entity.file, entity.line));

    let declared: Vec<String> = entity.descriptor.fields.iter().map(|f| f.name.clone()).collect();
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(entity.descriptor, SerializerRegistry::global())
        .with_context(|| format!("Failed to map entity '{}'", args.entity))?;

    let mut record = mapper.new_instance();
    for unknown in fill_record(&mut record, &declared, &args.values)? {
        output.warning(&format!("'{unknown}' is not a field of {}", args.entity));
    }

    let mut aliases: AliasMap = ctx.config.aliases.clone();
    for raw in &args.aliases {
        let (table, alias) = parse_pair(raw)?;
        aliases.insert(table, alias);
    }

    let selector = parse_selector(&args.fields)?;
    let set = mapper.make_assignment_fragment(&record, &selector, Some(&aliases))?;
    let table = mapper.table_name().ok().map(str::to_string);

    let statement = if args.insert {
        let table = mapper.table_name()?;
        Some(format!("INSERT {table} SET {set};"))
    } else {
        None
    };

    if set.is_empty() {
        output.warning("No fields selected");
    }
    if let Some(table) = &table {
        output.key_value("table", table);
    }
    output.key_value("selector", &args.fields);

    output.display(&SetResult {
        entity: args.entity,
        table,
        set,
        statement,
    })
}

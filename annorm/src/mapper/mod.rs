//! Entity mapper: resolves field metadata into serializers once, then renders
//! SQL assignment fragments for record instances.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::annotations::MetadataBlock;
use crate::assignment::AssignmentBuilder;
use crate::errors::{MapError, MapResult};
use crate::record::RecordFields;
use crate::registry::SerializerRegistry;
use crate::serializers::{FieldBinding, FieldSerializer};
use crate::types::{AliasMap, Entity, FieldDeclaration, FieldDescriptor, FieldSelector, TypeDescriptor, TypeTag};

/// Field-level annotation names.
pub const TYPE: &str = "type";
pub const SERIALIZER: &str = "serializer";
pub const TABLE: &str = "table";
pub const FIELD: &str = "field";
pub const PKEY: &str = "pkey";

struct MappedField {
    serializer_name: String,
    serializer: Box<dyn FieldSerializer>,
}

/// Maps one record type to SQL `SET` fragments.
///
/// Immutable after construction; share it freely between callers.
pub struct EntityMapper<E> {
    type_name: String,
    table: Option<String>,
    fields: Vec<MappedField>,
    _record: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityMapper<E> {
    /// Build a mapper for `E` against the global serializer registry.
    pub fn new() -> MapResult<Self> {
        Self::with_registry(SerializerRegistry::global())
    }

    pub fn with_registry(registry: &SerializerRegistry) -> MapResult<Self> {
        Self::from_descriptor(E::type_descriptor(), registry)
    }
}

impl<E> EntityMapper<E> {
    /// Build a mapper from an explicit type descriptor.
    ///
    /// Fails on an unrecognized `@type` tag or an unregistered `@serializer`.
    /// Fields carrying neither are left unmapped.
    pub fn from_descriptor(descriptor: TypeDescriptor, registry: &SerializerRegistry) -> MapResult<Self> {
        let class_info = MetadataBlock::parse(descriptor.metadata.as_deref());
        let table = class_info.get(TABLE).map(str::to_string);

        let mut fields = Vec::new();
        for declaration in descriptor.fields.iter().filter(|field| !field.is_static) {
            if let Some(field) = resolve_field(declaration, table.as_deref(), registry)? {
                log::debug!(
                    "{}: field '{}' mapped to column '{}' via '{}'",
                    descriptor.type_name,
                    declaration.name,
                    field.serializer.column_name(),
                    field.serializer_name
                );
                fields.push(field);
            } else {
                log::debug!(
                    "{}: field '{}' has no @type or @serializer, skipping",
                    descriptor.type_name,
                    declaration.name
                );
            }
        }

        Ok(Self {
            type_name: descriptor.type_name,
            table,
            fields,
            _record: PhantomData,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Table declared on the type with `@table`.
    pub fn table_name(&self) -> MapResult<&str> {
        self.table
            .as_deref()
            .filter(|table| !table.is_empty())
            .ok_or_else(|| MapError::MissingTable {
                entity: self.type_name.clone(),
            })
    }

    /// Mapped serializers in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldSerializer> {
        self.fields.iter().map(|field| field.serializer.as_ref())
    }

    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|field| {
                let binding = field.serializer.binding();
                FieldDescriptor {
                    field: binding.field.clone(),
                    table: binding.table.clone(),
                    column: binding.column.clone(),
                    serializer: field.serializer_name.clone(),
                    primary_key: binding.primary_key,
                }
            })
            .collect()
    }

    pub fn new_instance(&self) -> E
    where
        E: Default,
    {
        E::default()
    }

    /// Render the selected fields of `record` as `alias.column = literal`
    /// fragments joined with `", "`.
    pub fn make_assignment_fragment(
        &self,
        record: &E,
        selector: &FieldSelector,
        aliases: Option<&AliasMap>,
    ) -> MapResult<String>
    where
        E: Serialize,
    {
        let values = RecordFields::capture(record, &self.type_name)?;
        let mut builder = match aliases {
            Some(aliases) => AssignmentBuilder::with_aliases(aliases),
            None => AssignmentBuilder::new(),
        };

        for field in &self.fields {
            let serializer = field.serializer.as_ref();
            if selector.includes(serializer.field_name(), serializer.column_name(), serializer.is_primary_key()) {
                serializer.serialize(&values, &mut builder)?;
            }
        }

        Ok(builder.render())
    }

    /// Non-key fields, no aliases.
    pub fn make_set(&self, record: &E) -> MapResult<String>
    where
        E: Serialize,
    {
        self.make_assignment_fragment(record, &FieldSelector::AllExceptPrimaryKey, None)
    }
}

impl<E> fmt::Debug for EntityMapper<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityMapper")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("fields", &self.descriptors())
            .finish()
    }
}

fn resolve_field(
    declaration: &FieldDeclaration,
    default_table: Option<&str>,
    registry: &SerializerRegistry,
) -> MapResult<Option<MappedField>> {
    let info = MetadataBlock::parse(declaration.metadata.as_deref());

    let serializer_name = match info.get(SERIALIZER) {
        Some(name) => name.to_string(),
        None => match info.get(TYPE).filter(|tag| !tag.is_empty()) {
            None => return Ok(None),
            Some(tag) => match TypeTag::parse(tag) {
                Some(tag) => tag.serializer_name().to_string(),
                None => {
                    return Err(MapError::UnknownTypeTag {
                        field: declaration.name.clone(),
                        tag: tag.to_string(),
                    });
                }
            },
        },
    };

    let table = info.get(TABLE).or(default_table).map(str::to_string);
    let column = info.get(FIELD).unwrap_or(&declaration.name).to_string();
    let binding =
        FieldBinding::new(declaration.name.clone(), table, column, info.has(PKEY)).with_key(declaration.key.clone());

    let serializer = registry
        .create(&serializer_name, binding)
        .ok_or_else(|| MapError::UnknownSerializer {
            field: declaration.name.clone(),
            serializer: serializer_name.clone(),
        })?;

    Ok(Some(MappedField {
        serializer_name,
        serializer,
    }))
}

#[cfg(test)]
mod tests;

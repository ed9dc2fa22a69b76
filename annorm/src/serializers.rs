//! Field serializers: strategies that turn one field value into a SQL literal.

use std::fmt;

use serde_json::Value;

use crate::assignment::AssignmentBuilder;
use crate::errors::{MapError, MapResult};
use crate::record::RecordFields;

/// The identifiers every serializer is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Declared field identifier.
    pub field: String,
    /// Key the value is serialized under; the identifier unless renamed.
    pub key: String,
    pub table: Option<String>,
    pub column: String,
    pub primary_key: bool,
}

impl FieldBinding {
    pub fn new(
        field: impl Into<String>,
        table: Option<String>,
        column: impl Into<String>,
        primary_key: bool,
    ) -> Self {
        let field = field.into();
        Self {
            key: field.clone(),
            field,
            table,
            column: column.into(),
            primary_key,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

/// Strategy converting one field's runtime value into a SQL literal.
///
/// Implementors only decide how a value renders; reading the value and
/// emitting the fragment is shared.
pub trait FieldSerializer: fmt::Debug + Send + Sync {
    fn binding(&self) -> &FieldBinding;

    fn render(&self, value: &Value) -> MapResult<String>;

    fn serialize(&self, record: &RecordFields, builder: &mut AssignmentBuilder<'_>) -> MapResult<()> {
        let binding = self.binding();
        let table = binding.table.as_deref().filter(|table| !table.is_empty()).ok_or_else(|| {
            MapError::MissingFieldTable {
                field: binding.field.clone(),
            }
        })?;
        let literal = self.render(record.get(&binding.key).unwrap_or(&Value::Null))?;
        builder.set(table, &binding.column, &literal);
        Ok(())
    }

    fn field_name(&self) -> &str {
        &self.binding().field
    }

    fn column_name(&self) -> &str {
        &self.binding().column
    }

    fn table_name(&self) -> Option<&str> {
        self.binding().table.as_deref()
    }

    fn is_primary_key(&self) -> bool {
        self.binding().primary_key
    }
}

/// Render a value as a bare integer numeral; `null` becomes `NULL`.
#[derive(Debug, Clone)]
pub struct IntegerSerializer {
    binding: FieldBinding,
}

impl IntegerSerializer {
    pub fn new(binding: FieldBinding) -> Self {
        Self { binding }
    }

    fn coerce(&self, value: &Value) -> MapResult<String> {
        let coerced = match value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Some(int.to_string())
                } else if let Some(uint) = number.as_u64() {
                    Some(uint.to_string())
                } else {
                    number.as_f64().and_then(truncate_float).map(|int| int.to_string())
                }
            }
            Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
            Value::String(text) => text
                .trim()
                .parse::<i128>()
                .ok()
                .filter(|int| in_integer_range(*int))
                .map(|int| int.to_string()),
            _ => None,
        };
        coerced.ok_or_else(|| MapError::Coercion {
            field: self.binding.field.clone(),
            value: value.to_string(),
            target: "integer",
        })
    }
}

/// Integers render when they fit `i64` or `u64`, whichever way they arrive.
fn in_integer_range(int: i128) -> bool {
    (i64::MIN as i128..=u64::MAX as i128).contains(&int)
}

fn truncate_float(float: f64) -> Option<i128> {
    let truncated = float.trunc();
    // 2^64 is exactly representable; everything below it fits u64.
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < u64::MAX as f64).then_some(truncated as i128)
}

impl FieldSerializer for IntegerSerializer {
    fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    fn render(&self, value: &Value) -> MapResult<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            other => self.coerce(other),
        }
    }
}

/// Render a value single-quoted; `null` becomes `NULL`.
///
/// Embedded quotes are NOT escaped. Use [`QuotedStringSerializer`] for values
/// that may contain `'`.
#[derive(Debug, Clone)]
pub struct StringSerializer {
    binding: FieldBinding,
}

impl StringSerializer {
    pub fn new(binding: FieldBinding) -> Self {
        Self { binding }
    }
}

impl FieldSerializer for StringSerializer {
    fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    fn render(&self, value: &Value) -> MapResult<String> {
        Ok(match stringify(value) {
            Some(text) => format!("'{text}'"),
            None => "NULL".to_string(),
        })
    }
}

/// String serializer that doubles embedded single quotes.
#[derive(Debug, Clone)]
pub struct QuotedStringSerializer {
    binding: FieldBinding,
}

impl QuotedStringSerializer {
    pub fn new(binding: FieldBinding) -> Self {
        Self { binding }
    }
}

impl FieldSerializer for QuotedStringSerializer {
    fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    fn render(&self, value: &Value) -> MapResult<String> {
        Ok(match stringify(value) {
            Some(text) => format!("'{}'", text.replace('\'', "''")),
            None => "NULL".to_string(),
        })
    }
}

/// Text form of a non-null value.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

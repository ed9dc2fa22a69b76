use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{MapError, MapResult};

/// Field values of one record instance, keyed by serialized field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFields {
    values: Map<String, Value>,
}

impl RecordFields {
    /// Capture the fields of any record that serializes to a map.
    pub fn capture<E: Serialize + ?Sized>(record: &E, type_name: &str) -> MapResult<Self> {
        match serde_json::to_value(record)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(MapError::NotARecord {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// Value serialized under `key`, if the record wrote one.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl From<Map<String, Value>> for RecordFields {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

use thiserror::Error;

/// Top-level error type returned by entity mappers and field serializers.
#[derive(Debug, Error)]
pub enum MapError {
    /// A field declared a `@type` tag that has no built-in serializer.
    #[error("invalid value '{tag}' for @type annotation on field '{field}'")]
    UnknownTypeTag { field: String, tag: String },

    /// A field named a `@serializer` that is not present in the registry.
    #[error("unknown serializer '{serializer}' on field '{field}'")]
    UnknownSerializer { field: String, serializer: String },

    /// The entity type never declared a `@table`.
    #[error("no value specified for @table on entity '{entity}'")]
    MissingTable { entity: String },

    /// A mapped field has neither its own `@table` nor an entity-level one.
    #[error("no table resolved for field '{field}'")]
    MissingFieldTable { field: String },

    /// A field value could not be coerced to the serializer's scalar type.
    #[error("cannot coerce value {value} of field '{field}' to {target}")]
    Coercion {
        field: String,
        value: String,
        target: &'static str,
    },

    /// The record did not serialize to a map of named fields.
    #[error("record of type '{type_name}' does not serialize to named fields")]
    NotARecord { type_name: String },

    /// The record failed to serialize.
    #[error("record serialization failed: {0}")]
    Record(#[from] serde_json::Error),
}

impl MapError {
    /// Whether the error stems from entity metadata rather than record values.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MapError::UnknownTypeTag { .. }
                | MapError::UnknownSerializer { .. }
                | MapError::MissingTable { .. }
                | MapError::MissingFieldTable { .. }
        )
    }
}

/// Convenience alias for results produced by the mapping engine.
pub type MapResult<T> = Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_configuration_errors() {
        let err = MapError::UnknownTypeTag {
            field: "flag".into(),
            tag: "boolean".into(),
        };
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "invalid value 'boolean' for @type annotation on field 'flag'");

        let err = MapError::Coercion {
            field: "id".into(),
            value: "\"abc\"".into(),
            target: "integer",
        };
        assert!(!err.is_configuration());
    }
}

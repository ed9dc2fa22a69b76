use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::serializers::stringify;
use crate::{Entity, EntityMapper, FieldBinding, FieldSerializer, MapResult, SerializerRegistration};

/// Renders text upper-cased, with quotes doubled.
#[derive(Debug, Clone)]
pub struct ShoutingSerializer {
    binding: FieldBinding,
}

impl ShoutingSerializer {
    pub fn new(binding: FieldBinding) -> Self {
        Self { binding }
    }

    fn boxed(binding: FieldBinding) -> Box<dyn FieldSerializer> {
        Box::new(Self::new(binding))
    }
}

impl FieldSerializer for ShoutingSerializer {
    fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    fn render(&self, value: &Value) -> MapResult<String> {
        Ok(match stringify(value) {
            Some(text) => format!("'{}'", text.to_uppercase().replace('\'', "''")),
            None => "NULL".to_string(),
        })
    }
}

inventory::submit! {
    SerializerRegistration::new("shouting", ShoutingSerializer::boxed)
}

/// @table=announcements
#[derive(Entity, Serialize, Default, Debug)]
pub struct Announcement {
    /// @type=integer
    /// @pkey
    pub id: Option<i64>,

    /// Headline shown on the board.
    /// @serializer=shouting
    /// @field=headline_text
    pub headline: Option<String>,

    /// @type=string
    pub body: Option<String>,
}

/// Example 02 – a self-registered serializer selected with `@serializer`.
pub fn run() -> Result<String> {
    let mapper = EntityMapper::<Announcement>::new()?;

    let announcement = Announcement {
        id: Some(7),
        headline: Some("doors open at noon".to_string()),
        body: Some("Bring a friend.".to_string()),
    };

    Ok(mapper.make_set(&announcement)?)
}

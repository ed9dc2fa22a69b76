//! Named registry of field serializer factories.
//!
//! Built-in serializers are always present. Other crates contribute their own
//! with `inventory::submit!`:
//!
//! ```ignore
//! annorm::inventory::submit! {
//!     annorm::SerializerRegistration::new("upper", |binding| Box::new(UpperSerializer::new(binding)))
//! }
//! ```
//!
//! and select them on a field with `@serializer=upper`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::serializers::{
    FieldBinding, FieldSerializer, IntegerSerializer, QuotedStringSerializer, StringSerializer,
};

/// Builds a serializer from the identifiers of the field it serves.
pub type SerializerFactory = fn(FieldBinding) -> Box<dyn FieldSerializer>;

/// A serializer submitted to the process-wide registry.
pub struct SerializerRegistration {
    pub name: &'static str,
    pub factory: SerializerFactory,
}

impl SerializerRegistration {
    pub const fn new(name: &'static str, factory: SerializerFactory) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(SerializerRegistration);

static GLOBAL: OnceLock<SerializerRegistry> = OnceLock::new();

#[derive(Clone)]
pub struct SerializerRegistry {
    factories: HashMap<String, SerializerFactory>,
}

impl SerializerRegistry {
    /// Registry holding only the built-in serializers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("integer", |binding| Box::new(IntegerSerializer::new(binding)));
        registry.register("string", |binding| Box::new(StringSerializer::new(binding)));
        registry.register("quoted_string", |binding| Box::new(QuotedStringSerializer::new(binding)));
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Built-ins plus every serializer submitted through inventory.
    pub fn with_registered() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<SerializerRegistration>() {
            registry.register(registration.name, registration.factory);
        }
        registry
    }

    /// Shared, immutable registry built on first use from [`Self::with_registered`].
    pub fn global() -> &'static SerializerRegistry {
        GLOBAL.get_or_init(Self::with_registered)
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: SerializerFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn create(&self, name: &str, binding: FieldBinding) -> Option<Box<dyn FieldSerializer>> {
        self.factories.get(name).map(|factory| factory(binding))
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry").field("names", &self.names()).finish()
    }
}

//! annorm core library.
//!
//! Maps records to partial SQL `SET` clauses using annotations written in
//! doc comments:
//!
//! ```ignore
//! use annorm::{Entity, EntityMapper};
//!
//! /// @table=guestbook
//! #[derive(Entity, Serialize, Default)]
//! struct GuestbookRecord {
//!     /// @type=integer
//!     /// @pkey
//!     id: Option<i64>,
//!     /// @type=string
//!     message: Option<String>,
//! }
//!
//! let mapper = EntityMapper::<GuestbookRecord>::new()?;
//! let set = mapper.make_set(&record)?; // "guestbook.message = 'Hello World!'"
//! ```

extern crate self as annorm;

pub mod annotations;
pub mod assignment;
pub mod errors;
pub mod examples;
pub mod mapper;
pub mod record;
pub mod registration;
pub mod registry;
pub mod serializers;
pub mod types;

pub use annotations::MetadataBlock;
pub use annorm_macros::Entity;
pub use assignment::AssignmentBuilder;
pub use errors::*;
pub use mapper::EntityMapper;
pub use record::RecordFields;
pub use registration::{EntityRegistration, get_entity_by_name, is_entity_registered, registered_entities};
pub use registry::{SerializerFactory, SerializerRegistration, SerializerRegistry};
pub use serializers::{FieldBinding, FieldSerializer, IntegerSerializer, QuotedStringSerializer, StringSerializer};
pub use types::{AliasMap, Entity, FieldDeclaration, FieldDescriptor, FieldSelector, TypeDescriptor, TypeTag};

// Re-export inventory for the derive macro and custom serializer registration
pub use inventory;

//! Entity scanning module for reading `#[derive(Entity)]` structs from Rust source files.
//!
//! This module provides functionality to:
//! - Discover Rust files mentioning the Entity derive
//! - Parse struct definitions and rebuild their type descriptors from doc comments

mod discovery;
mod parser;

pub use discovery::discover_entities;
pub use parser::{ScannedEntity, parse_entity_file};

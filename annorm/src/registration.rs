//! Entity auto-registration via inventory crate.
//!
//! `#[derive(Entity)]` submits an [`EntityRegistration`] for every derived
//! type, so mappers can be looked up by type name at runtime.

use std::any::TypeId;

use crate::types::TypeDescriptor;

/// Metadata for auto-discovered entities.
pub struct EntityRegistration {
    /// The TypeId of the entity struct
    pub type_id: fn() -> TypeId,
    /// The name of the entity type (e.g., "Guestbook")
    pub type_name: &'static str,
    /// Function to get the type descriptor
    pub descriptor_fn: fn() -> TypeDescriptor,
}

inventory::collect!(EntityRegistration);

/// Get all registered entities.
pub fn registered_entities() -> impl Iterator<Item = &'static EntityRegistration> {
    inventory::iter::<EntityRegistration>()
}

/// Get a registered entity by type name.
pub fn get_entity_by_name(type_name: &str) -> Option<&'static EntityRegistration> {
    registered_entities().find(|e| e.type_name == type_name)
}

/// Check if an entity type is registered.
pub fn is_entity_registered<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    registered_entities().any(|e| (e.type_id)() == type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_entities_iterator() {
        // Entities linked into this test binary come from src/examples.
        assert!(get_entity_by_name("GuestbookRecord").is_some());
        assert!(!is_entity_registered::<String>());
    }
}

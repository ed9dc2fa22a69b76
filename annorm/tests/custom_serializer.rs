use annorm::examples::example02_custom_serializer::Announcement;
use annorm::{EntityMapper, SerializerRegistry};

#[test]
fn registered_serializer_is_used() {
    let set = annorm::examples::example02_custom_serializer::run().expect("example should succeed");
    assert_eq!(
        set,
        "announcements.headline_text = 'DOORS OPEN AT NOON', announcements.body = 'Bring a friend.'"
    );
}

#[test]
fn global_registry_sees_submitted_serializers() {
    let registry = SerializerRegistry::global();
    assert!(registry.contains("shouting"));
    assert!(registry.names().contains(&"integer"));
}

#[test]
fn registry_without_submission_rejects_entity() {
    let err = EntityMapper::<Announcement>::with_registry(&SerializerRegistry::new()).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "unknown serializer 'shouting' on field 'headline'");
}

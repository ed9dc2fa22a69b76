use serde::Serialize;
use serde_json::{Map, Value, json};

use super::*;

#[derive(Debug, Default, Serialize)]
struct Guestbook {
    id: Option<i64>,
    message: Option<String>,
    title: Option<String>,
    note: Option<String>,
}

impl Entity for Guestbook {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Guestbook", Some(" @table=guestbook"))
            .field("id", Some(" @type=integer\n @pkey"))
            .field("message", Some(" @type=string"))
            .field("title", Some(" @serializer=string"))
            .field("note", Some(" Free-form note, never persisted."))
    }
}

fn sample() -> Guestbook {
    Guestbook {
        id: Some(42),
        message: Some("Hello World!".into()),
        title: Some("Test".into()),
        note: Some("ignored".into()),
    }
}

#[test]
fn default_selector_skips_primary_key() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let set = mapper
        .make_assignment_fragment(&sample(), &FieldSelector::default(), None)
        .unwrap();
    assert_eq!(set, "guestbook.message = 'Hello World!', guestbook.title = 'Test'");
    assert_eq!(mapper.make_set(&sample()).unwrap(), set);
    assert_eq!(mapper.table_name().unwrap(), "guestbook");
}

#[test]
fn primary_key_only() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let set = mapper
        .make_assignment_fragment(&sample(), &FieldSelector::PrimaryKeyOnly, None)
        .unwrap();
    assert_eq!(set, "guestbook.id = 42");
}

#[test]
fn all_fields_in_declaration_order() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let set = mapper
        .make_assignment_fragment(&sample(), &FieldSelector::AllFields, None)
        .unwrap();
    assert_eq!(
        set,
        "guestbook.id = 42, guestbook.message = 'Hello World!', guestbook.title = 'Test'"
    );
}

#[test]
fn explicit_selection_ignores_key_status() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let selector = FieldSelector::explicit(["id", "title", "note"]);
    let set = mapper.make_assignment_fragment(&sample(), &selector, None).unwrap();
    assert_eq!(set, "guestbook.id = 42, guestbook.title = 'Test'");
}

#[test]
fn aliases_replace_table_names() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let aliases = AliasMap::from([("guestbook".to_string(), "g".to_string())]);
    let set = mapper
        .make_assignment_fragment(&sample(), &FieldSelector::default(), Some(&aliases))
        .unwrap();
    assert_eq!(set, "g.message = 'Hello World!', g.title = 'Test'");
}

#[test]
fn null_values_render_as_null() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let record = mapper.new_instance();
    let set = mapper
        .make_assignment_fragment(&record, &FieldSelector::AllFields, None)
        .unwrap();
    assert_eq!(set, "guestbook.id = NULL, guestbook.message = NULL, guestbook.title = NULL");
}

#[test]
fn untyped_and_static_fields_are_not_mapped() {
    let descriptor = TypeDescriptor::new("Counter", Some("@table=counters"))
        .static_field("instances", Some("@type=integer"))
        .field("hits", Some("@type=integer"))
        .field("cache", None)
        .field("flagged", Some("@type"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();
    let names: Vec<_> = mapper.fields().map(|field| field.field_name().to_string()).collect();
    assert_eq!(names, vec!["hits"]);
}

#[test]
fn unknown_type_tag_fails_construction() {
    let descriptor = TypeDescriptor::new("Flags", Some("@table=flags")).field("enabled", Some("@type=boolean"));
    let err = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, MapError::UnknownTypeTag { ref field, ref tag } if field == "enabled" && tag == "boolean"));
}

#[test]
fn unknown_serializer_fails_construction() {
    let descriptor = TypeDescriptor::new("Flags", Some("@table=flags")).field("enabled", Some("@serializer=bitflag"));
    let err = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap_err();
    assert!(matches!(err, MapError::UnknownSerializer { ref serializer, .. } if serializer == "bitflag"));
}

#[test]
fn serializer_annotation_takes_precedence_over_type() {
    let descriptor = TypeDescriptor::new("Row", Some("@table=rows"))
        .field("count", Some("@type=boolean @serializer=integer"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();
    assert_eq!(mapper.descriptors()[0].serializer, "integer");
}

#[test]
fn column_and_table_overrides() {
    let descriptor = TypeDescriptor::new("Post", Some("@table=posts"))
        .field("author", Some("@type=string @table=users @field=user_name"))
        .field("body", Some("@type=string @field=content"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();

    let record = json!({"author": "ann", "body": "text"}).as_object().cloned().unwrap();
    let set = mapper
        .make_assignment_fragment(&record, &FieldSelector::AllFields, None)
        .unwrap();
    assert_eq!(set, "users.user_name = 'ann', posts.content = 'text'");

    let by_column = FieldSelector::explicit(["content"]);
    assert_eq!(
        mapper.make_assignment_fragment(&record, &by_column, None).unwrap(),
        "posts.content = 'text'"
    );
}

#[test]
fn missing_table_is_reported_when_needed() {
    let descriptor = TypeDescriptor::new("Loose", None)
        .field("id", Some("@type=integer @pkey"))
        .field("name", Some("@type=string @table=names"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();

    let err = mapper.table_name().unwrap_err();
    assert!(matches!(err, MapError::MissingTable { ref entity } if entity == "Loose"));

    let record = json!({"id": 1, "name": "x"}).as_object().cloned().unwrap();
    assert_eq!(mapper.make_set(&record).unwrap(), "names.name = 'x'");
    let err = mapper
        .make_assignment_fragment(&record, &FieldSelector::PrimaryKeyOnly, None)
        .unwrap_err();
    assert!(matches!(err, MapError::MissingFieldTable { ref field } if field == "id"));
}

#[test]
fn non_record_values_are_rejected() {
    let descriptor = TypeDescriptor::new("Scalar", Some("@table=s")).field("v", Some("@type=integer"));
    let mapper = EntityMapper::<i64>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();
    let err = mapper.make_set(&5).unwrap_err();
    assert!(matches!(err, MapError::NotARecord { .. }));
}

#[test]
fn descriptors_expose_resolution() {
    let mapper = EntityMapper::<Guestbook>::new().unwrap();
    let descriptors = mapper.descriptors();
    assert_eq!(descriptors.len(), 3);
    assert_eq!(descriptors[0].column, "id");
    assert!(descriptors[0].primary_key);
    assert_eq!(descriptors[2].serializer, "string");
    assert_eq!(descriptors[2].table.as_deref(), Some("guestbook"));
}

#[test]
fn mapper_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityMapper<Guestbook>>();
}

#[test]
fn values_are_read_under_renamed_keys() {
    let descriptor = TypeDescriptor::new("User", Some("@table=users"))
        .renamed_field("user_id", "userId", Some("@type=integer @pkey"))
        .renamed_field("email", "mail", Some("@type=string"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();

    let record = json!({"userId": 5, "mail": "a@x"}).as_object().cloned().unwrap();
    assert_eq!(
        mapper.make_assignment_fragment(&record, &FieldSelector::AllFields, None).unwrap(),
        "users.user_id = 5, users.email = 'a@x'"
    );
}

#[test]
fn absent_field_renders_null() {
    let descriptor = TypeDescriptor::new("Post", Some("@table=posts"))
        .field("id", Some("@type=integer @pkey"))
        .field("body", Some("@type=string"));
    let mapper = EntityMapper::<Map<String, Value>>::from_descriptor(descriptor, &SerializerRegistry::new()).unwrap();

    let record = json!({"id": 3}).as_object().cloned().unwrap();
    assert_eq!(
        mapper.make_assignment_fragment(&record, &FieldSelector::PrimaryKeyOnly, None).unwrap(),
        "posts.id = 3"
    );
    assert_eq!(mapper.make_set(&record).unwrap(), "posts.body = NULL");
}

use chrono::{TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson};

use weft_persist::models::{Thread, User, UserProfile};

fn sample_thread() -> Thread {
    Thread {
        id: ObjectId::new(),
        text: "hello".to_string(),
        author: ObjectId::new(),
        parent_id: None,
        children: Vec::new(),
        created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        community: None,
    }
}

#[test]
fn test_thread_id_maps_to_underscore_id() {
    let thread = sample_thread();
    let doc = mongodb::bson::to_document(&thread).unwrap();
    assert_eq!(doc.get_object_id("_id").unwrap(), thread.id);
    assert!(!doc.contains_key("id"));
}

#[test]
fn test_top_level_thread_serializes_without_parent_id() {
    let doc = mongodb::bson::to_document(&sample_thread()).unwrap();
    assert!(!doc.contains_key("parent_id"));
    assert!(!doc.contains_key("community"));
}

#[test]
fn test_created_at_is_stored_as_bson_datetime() {
    let doc = mongodb::bson::to_document(&sample_thread()).unwrap();
    assert!(matches!(doc.get("created_at"), Some(Bson::DateTime(_))));
}

#[test]
fn test_thread_without_parent_fields_deserializes_as_top_level() {
    let doc = doc! {
        "_id": ObjectId::new(),
        "text": "bare document",
        "author": ObjectId::new(),
        "created_at": mongodb::bson::DateTime::from_millis(1_700_000_000_000),
    };
    let thread: Thread = mongodb::bson::from_document(doc).unwrap();
    assert!(thread.is_top_level());
    assert!(thread.children.is_empty());
}

#[test]
fn test_reply_round_trips_parent_reference() {
    let mut thread = sample_thread();
    thread.parent_id = Some(ObjectId::new());
    let doc = mongodb::bson::to_document(&thread).unwrap();
    let back: Thread = mongodb::bson::from_document(doc).unwrap();
    assert_eq!(back.parent_id, thread.parent_id);
    assert!(!back.is_top_level());
}

#[test]
fn test_user_key_maps_to_underscore_id() {
    let user = User {
        key: ObjectId::new(),
        id: "ext_1".to_string(),
        username: "alice".to_string(),
        name: "Alice".to_string(),
        bio: String::new(),
        image: String::new(),
        onboarded: true,
        threads: Vec::new(),
        created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    };
    let doc = mongodb::bson::to_document(&user).unwrap();
    assert_eq!(doc.get_object_id("_id").unwrap(), user.key);
    // External identifier is a separate field.
    assert_eq!(doc.get_str("id").unwrap(), "ext_1");
}

#[test]
fn test_parse_object_id_accepts_hex_and_rejects_garbage() {
    let id = ObjectId::new();
    assert_eq!(weft_persist::parse_object_id(&id.to_hex()).unwrap(), id);
    assert!(matches!(
        weft_persist::parse_object_id("not-an-id"),
        Err(weft_persist::PersistError::InvalidObjectId(_))
    ));
}

#[test]
fn test_profile_username_is_lowercased_on_write() {
    let profile = UserProfile {
        user_id: "ext_1".to_string(),
        username: "AliceInChains".to_string(),
        name: "Alice".to_string(),
        bio: String::new(),
        image: String::new(),
    };
    assert_eq!(profile.normalized_username(), "aliceinchains");
}

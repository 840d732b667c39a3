use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Regex};

use weft_persist::repositories::{activity_predicate, directory_predicate, own_threads_predicate};
use weft_persist::repositories::top_level_predicate;
use weft_persist::Predicate;

// bson 2.x has no `Bson::as_regex`; provide it so the accessor chains below compile.
trait AsRegex {
    fn as_regex(&self) -> Option<&Regex>;
}

impl AsRegex for Bson {
    fn as_regex(&self) -> Option<&Regex> {
        match self {
            Bson::RegularExpression(regex) => Some(regex),
            _ => None,
        }
    }
}

fn contains_regex(needle: &str) -> Bson {
    Bson::RegularExpression(Regex {
        pattern: needle.to_string(),
        options: "i".to_string(),
    })
}

#[test]
fn test_top_level_filter_matches_null_or_absent_parent() {
    let filter = top_level_predicate().into_document();
    assert_eq!(filter, doc! { "parent_id": Bson::Null });
}

#[test]
fn test_directory_filter_always_excludes_self() {
    let filter = directory_predicate("user_1", "").into_document();
    assert_eq!(filter, doc! { "id": { "$ne": "user_1" } });
}

#[test]
fn test_directory_filter_single_space_is_treated_as_empty() {
    let with_space = directory_predicate("user_1", " ").into_document();
    let without = directory_predicate("user_1", "").into_document();
    assert_eq!(with_space, without);
}

#[test]
fn test_directory_filter_with_search_matches_username_or_name() {
    let filter = directory_predicate("user_1", "ali").into_document();
    assert_eq!(
        filter,
        doc! {
            "$and": [
                { "id": { "$ne": "user_1" } },
                { "$or": [
                    { "username": contains_regex("ali") },
                    { "name": contains_regex("ali") },
                ] },
            ]
        }
    );
}

#[test]
fn test_directory_search_is_case_insensitive() {
    let filter = directory_predicate("user_1", "Ali").into_document();
    let and = filter.get_array("$and").unwrap();
    let or = and[1].as_document().unwrap().get_array("$or").unwrap();
    let regex = or[0]
        .as_document()
        .unwrap()
        .get("username")
        .unwrap()
        .as_regex()
        .unwrap();
    assert_eq!(regex.options, "i");
}

#[test]
fn test_directory_search_escapes_regex_metacharacters() {
    let filter = directory_predicate("user_1", "a.b").into_document();
    let and = filter.get_array("$and").unwrap();
    let or = and[1].as_document().unwrap().get_array("$or").unwrap();
    let regex = or[0]
        .as_document()
        .unwrap()
        .get("username")
        .unwrap()
        .as_regex()
        .unwrap();
    assert_eq!(regex.pattern, "a\\.b");
}

#[test]
fn test_own_threads_filter_uses_author_field() {
    let author = ObjectId::new();
    let filter = own_threads_predicate(author).into_document();
    assert_eq!(filter, doc! { "author": author });
}

#[test]
fn test_activity_filter_excludes_own_replies() {
    let author = ObjectId::new();
    let a = ObjectId::new();
    let b = ObjectId::new();
    let filter = activity_predicate(author, vec![a, b]).into_document();
    assert_eq!(
        filter,
        doc! {
            "$and": [
                { "_id": { "$in": [a, b] } },
                { "author": { "$ne": author } },
            ]
        }
    );
}

#[test]
fn test_all_with_single_clause_unwraps() {
    let filter = Predicate::All(vec![Predicate::Eq("id", "x".into())]).into_document();
    assert_eq!(filter, doc! { "id": "x" });
}

#[test]
fn test_empty_conjunction_matches_everything() {
    let filter = Predicate::All(vec![]).into_document();
    assert!(filter.is_empty());
}

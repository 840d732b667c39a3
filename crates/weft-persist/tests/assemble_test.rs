use chrono::{TimeZone, Utc};
use mongodb::bson::oid::ObjectId;

use weft_persist::assemble::{
    attach_replies, build_feed_posts, collect_reply_candidates, index_threads, index_users,
    join_reply_authors,
};
use weft_persist::models::{Thread, User, UserPreview};

fn user(external_id: &str, name: &str) -> User {
    User {
        key: ObjectId::new(),
        id: external_id.to_string(),
        username: name.to_lowercase(),
        name: name.to_string(),
        bio: String::new(),
        image: format!("https://img.example/{}.png", external_id),
        onboarded: true,
        threads: Vec::new(),
        created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
    }
}

fn thread(author: &User, text: &str) -> Thread {
    Thread {
        id: ObjectId::new(),
        text: text.to_string(),
        author: author.key,
        parent_id: None,
        children: Vec::new(),
        created_at: Utc.timestamp_millis_opt(1_700_000_100_000).unwrap(),
        community: None,
    }
}

fn reply_to(parent: &mut Thread, author: &User, text: &str) -> Thread {
    let mut reply = thread(author, text);
    reply.parent_id = Some(parent.id);
    parent.children.push(reply.id);
    reply
}

#[test]
fn test_attaches_author_and_children_in_reply_order() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut root = thread(&alice, "hello");
    let first = reply_to(&mut root, &bob, "first reply");
    let second = reply_to(&mut root, &alice, "second reply");

    let authors = index_users(vec![alice.clone(), bob.clone()]);
    let children = index_threads(vec![second.clone(), first.clone()]);

    let posts = build_feed_posts(vec![root.clone()], &authors, &children);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author, alice);
    assert_eq!(posts[0].children.len(), 2);
    // Reply order follows the parent's children list, not fetch order.
    assert_eq!(posts[0].children[0].id, first.id);
    assert_eq!(posts[0].children[1].id, second.id);
    assert_eq!(posts[0].children[0].author, UserPreview::from(&bob));
}

#[test]
fn test_reply_never_appears_as_standalone_post() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut root = thread(&alice, "hello");
    let reply = reply_to(&mut root, &bob, "a reply");

    assert!(root.is_top_level());
    assert!(!reply.is_top_level());

    // The reply surfaces only through its parent's entry.
    let authors = index_users(vec![alice.clone(), bob.clone()]);
    let children = index_threads(vec![reply.clone()]);
    let posts = build_feed_posts(vec![root], &authors, &children);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].children[0].id, reply.id);
    assert_eq!(posts[0].children[0].parent_id, Some(posts[0].id));
}

#[test]
fn test_dangling_child_reference_is_skipped() {
    let alice = user("u_alice", "Alice");
    let mut root = thread(&alice, "hello");
    root.children.push(ObjectId::new()); // no such thread fetched

    let authors = index_users(vec![alice]);
    let children = index_threads(vec![]);
    let posts = build_feed_posts(vec![root], &authors, &children);
    assert_eq!(posts.len(), 1);
    assert!(posts[0].children.is_empty());
}

#[test]
fn test_post_without_resolvable_author_is_dropped() {
    let alice = user("u_alice", "Alice");
    let root = thread(&alice, "hello");

    let posts = build_feed_posts(vec![root], &index_users(vec![]), &index_threads(vec![]));
    assert!(posts.is_empty());
}

#[test]
fn test_candidate_collection_preserves_multiplicity_and_order() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut first = thread(&alice, "one");
    let mut second = thread(&alice, "two");
    let r1 = reply_to(&mut first, &bob, "r1");
    let r2 = reply_to(&mut second, &bob, "r2");
    // A duplicated back-reference stays duplicated in the candidate list.
    second.children.push(r1.id);

    let candidates = collect_reply_candidates(&[first, second]);
    assert_eq!(candidates, vec![r1.id, r2.id, r1.id]);
}

#[test]
fn test_join_reply_authors_keeps_retrieval_order() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut root = thread(&alice, "root");
    let r1 = reply_to(&mut root, &bob, "r1");
    let r2 = reply_to(&mut root, &bob, "r2");

    let authors = index_users(vec![bob.clone()]);
    let replies = join_reply_authors(vec![r2.clone(), r1.clone()], &authors);
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].id, r2.id);
    assert_eq!(replies[1].id, r1.id);
    assert_eq!(replies[0].author.id, bob.key);
}

#[test]
fn test_attach_replies_skips_child_with_unknown_author() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut root = thread(&alice, "root");
    let known = reply_to(&mut root, &bob, "known author");
    let orphan = reply_to(&mut root, &user("u_ghost", "Ghost"), "unknown author");

    let authors = index_users(vec![alice, bob]);
    let children = index_threads(vec![known.clone(), orphan]);
    let replies = attach_replies(&root.children, &children, &authors);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].id, known.id);
}

#[test]
fn test_assembly_is_deterministic() {
    let alice = user("u_alice", "Alice");
    let bob = user("u_bob", "Bob");
    let mut root = thread(&alice, "hello");
    let reply = reply_to(&mut root, &bob, "a reply");

    let authors = index_users(vec![alice, bob]);
    let children = index_threads(vec![reply]);
    let once = build_feed_posts(vec![root.clone()], &authors, &children);
    let twice = build_feed_posts(vec![root], &authors, &children);
    assert_eq!(once, twice);
}

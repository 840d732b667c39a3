//! Explicit reference resolution.
//!
//! The store keeps references (`author`, `children`, `parent_id`) as raw
//! ObjectIds. Resolution happens here as an auditable two-step: batch-load
//! every referenced entity with one `$in` query per collection, then attach
//! from an id index. The attach step is pure and takes pre-fetched maps, so
//! the join logic is testable without a running store.

use std::collections::HashMap;

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use mongodb::Collection;

use crate::error::{PersistError, Result};
use crate::models::{FeedPost, Reply, Thread, User, UserPreview};
use crate::query::Predicate;

/// Resolves a batch of threads into `FeedPost`s: full author join on each
/// thread, preview author join on each child, one level deep.
#[derive(Clone)]
pub struct ThreadTreeAssembler {
    threads: Collection<Thread>,
    users: Collection<User>,
}

impl ThreadTreeAssembler {
    pub fn new(threads: Collection<Thread>, users: Collection<User>) -> Self {
        Self { threads, users }
    }

    /// `op` is the public operation this resolution runs under; any store
    /// failure is reported against it.
    pub async fn assemble(&self, op: &'static str, roots: Vec<Thread>) -> Result<Vec<FeedPost>> {
        let child_ids = collect_reply_candidates(&roots);
        let children = self.fetch_threads_by_id(op, &child_ids).await?;

        let mut author_ids: Vec<ObjectId> = roots
            .iter()
            .map(|t| t.author)
            .chain(children.values().map(|t| t.author))
            .collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.fetch_users_by_id(op, &author_ids).await?;

        Ok(build_feed_posts(roots, &authors, &children))
    }

    pub async fn fetch_threads_by_id(
        &self,
        op: &'static str,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, Thread>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let filter = Predicate::In("_id", ids.iter().map(|id| Bson::ObjectId(*id)).collect())
            .into_document();
        let found: Vec<Thread> = self
            .threads
            .find(filter)
            .await
            .map_err(|e| PersistError::store(op, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(op, e))?;
        Ok(index_threads(found))
    }

    pub async fn fetch_users_by_id(
        &self,
        op: &'static str,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, User>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let filter = Predicate::In("_id", ids.iter().map(|id| Bson::ObjectId(*id)).collect())
            .into_document();
        let found: Vec<User> = self
            .users
            .find(filter)
            .await
            .map_err(|e| PersistError::store(op, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(op, e))?;
        Ok(index_users(found))
    }
}

pub fn index_threads(threads: Vec<Thread>) -> HashMap<ObjectId, Thread> {
    threads.into_iter().map(|t| (t.id, t)).collect()
}

pub fn index_users(users: Vec<User>) -> HashMap<ObjectId, User> {
    users.into_iter().map(|u| (u.key, u)).collect()
}

/// Concatenation of `children` across the given threads, in thread order then
/// reply order. Multiplicity is preserved; the store's `$in` fetch dedups.
pub fn collect_reply_candidates(threads: &[Thread]) -> Vec<ObjectId> {
    threads
        .iter()
        .flat_map(|t| t.children.iter().copied())
        .collect()
}

/// Attach resolved entities to each thread. A thread whose author is missing
/// from the index is dropped, since a post is unrenderable without one.
pub fn build_feed_posts(
    roots: Vec<Thread>,
    authors: &HashMap<ObjectId, User>,
    children: &HashMap<ObjectId, Thread>,
) -> Vec<FeedPost> {
    roots
        .into_iter()
        .filter_map(|thread| build_feed_post(thread, authors, children))
        .collect()
}

pub fn build_feed_post(
    thread: Thread,
    authors: &HashMap<ObjectId, User>,
    children: &HashMap<ObjectId, Thread>,
) -> Option<FeedPost> {
    let Some(author) = authors.get(&thread.author) else {
        tracing::warn!(thread = %thread.id, author = %thread.author, "dangling author reference");
        return None;
    };
    let replies = attach_replies(&thread.children, children, authors);
    Some(FeedPost {
        id: thread.id,
        text: thread.text,
        parent_id: thread.parent_id,
        created_at: thread.created_at,
        author: author.clone(),
        children: replies,
    })
}

/// Resolve child references in stored reply order. Dangling references are
/// skipped.
pub fn attach_replies(
    child_ids: &[ObjectId],
    threads: &HashMap<ObjectId, Thread>,
    authors: &HashMap<ObjectId, User>,
) -> Vec<Reply> {
    child_ids
        .iter()
        .filter_map(|id| {
            let Some(child) = threads.get(id) else {
                tracing::warn!(child = %id, "dangling child reference");
                return None;
            };
            let Some(author) = authors.get(&child.author) else {
                tracing::warn!(child = %id, author = %child.author, "dangling author reference");
                return None;
            };
            Some(Reply::new(child, UserPreview::from(author)))
        })
        .collect()
}

/// Join author previews onto already-fetched reply threads, keeping the
/// store's retrieval order.
pub fn join_reply_authors(replies: Vec<Thread>, authors: &HashMap<ObjectId, User>) -> Vec<Reply> {
    replies
        .into_iter()
        .filter_map(|thread| {
            let Some(author) = authors.get(&thread.author) else {
                tracing::warn!(reply = %thread.id, author = %thread.author, "dangling author reference");
                return None;
            };
            Some(Reply::new(&thread, UserPreview::from(author)))
        })
        .collect()
}

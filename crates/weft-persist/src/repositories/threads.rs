use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use weft_types::{RevalidationEvent, RevalidationSink};

use crate::error::{PersistError, Result};
use crate::models::{Thread, User};

/// Thread write paths. Both keep the read invariants intact: the author's
/// `threads` list always names exactly what they authored, and a reply's
/// `parent_id` is always mirrored by an entry in the parent's `children`.
#[derive(Clone)]
pub struct ThreadRepository {
    threads: Collection<Thread>,
    users: Collection<User>,
    sink: Arc<dyn RevalidationSink>,
}

impl ThreadRepository {
    pub fn new(client: &Client, db_name: &str, sink: Arc<dyn RevalidationSink>) -> Self {
        let db = client.database(db_name);
        Self {
            threads: db.collection("threads"),
            users: db.collection("users"),
            sink,
        }
    }

    /// Create a top-level thread and append it to the author's thread list.
    pub async fn create_thread(
        &self,
        text: impl Into<String>,
        author: ObjectId,
        path: &str,
    ) -> Result<Thread> {
        const OP: &str = "create_thread";

        let thread = Thread {
            id: ObjectId::new(),
            text: text.into(),
            author,
            parent_id: None,
            children: Vec::new(),
            created_at: Utc::now(),
            community: None,
        };

        self.threads
            .insert_one(&thread)
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        self.users
            .update_one(
                doc! { "_id": author },
                doc! { "$push": { "threads": thread.id } },
            )
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        self.sink.revalidate(RevalidationEvent::new(path)).await;
        Ok(thread)
    }

    /// Create a reply under `parent`. Errors with `ThreadNotFound` when the
    /// parent is absent; a reply to nothing would break the tree.
    pub async fn add_reply(
        &self,
        parent: ObjectId,
        text: impl Into<String>,
        author: ObjectId,
        path: &str,
    ) -> Result<Thread> {
        const OP: &str = "add_reply";

        let parent_thread = self
            .threads
            .find_one(doc! { "_id": parent })
            .await
            .map_err(|e| PersistError::store(OP, e))?
            .ok_or_else(|| PersistError::ThreadNotFound(parent.to_hex()))?;

        let reply = Thread {
            id: ObjectId::new(),
            text: text.into(),
            author,
            parent_id: Some(parent_thread.id),
            children: Vec::new(),
            created_at: Utc::now(),
            community: None,
        };

        self.threads
            .insert_one(&reply)
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        self.threads
            .update_one(
                doc! { "_id": parent_thread.id },
                doc! { "$push": { "children": reply.id } },
            )
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        self.users
            .update_one(
                doc! { "_id": author },
                doc! { "$push": { "threads": reply.id } },
            )
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        self.sink.revalidate(RevalidationEvent::new(path)).await;
        Ok(reply)
    }
}

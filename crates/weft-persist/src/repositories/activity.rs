use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use mongodb::{Client, Collection};

use crate::assemble::{self, ThreadTreeAssembler};
use crate::error::{PersistError, Result};
use crate::models::{Reply, Thread, User};
use crate::query::Predicate;

/// Filter selecting every thread a user authored.
pub fn own_threads_predicate(author: ObjectId) -> Predicate {
    Predicate::Eq("author", Bson::ObjectId(author))
}

/// Filter selecting the candidate replies that count as activity: any of the
/// given ids, except threads the user authored themselves.
pub fn activity_predicate(author: ObjectId, candidates: Vec<ObjectId>) -> Predicate {
    Predicate::All(vec![
        Predicate::In("_id", candidates.into_iter().map(Bson::ObjectId).collect()),
        Predicate::Ne("author", Bson::ObjectId(author)),
    ])
}

/// Computes the replies a user received on their own threads. Self-replies
/// never count as activity.
#[derive(Clone)]
pub struct ActivityAggregator {
    threads: Collection<Thread>,
    assembler: ThreadTreeAssembler,
}

impl ActivityAggregator {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        let threads: Collection<Thread> = db.collection("threads");
        let users: Collection<User> = db.collection("users");
        let assembler = ThreadTreeAssembler::new(threads.clone(), users);
        Self { threads, assembler }
    }

    /// Two-hop query: own threads, then their children, refetched with the
    /// author exclusion applied. Reply authorship can only be checked after
    /// the children are known, so this is not a single join. A reply created
    /// between the two hops may or may not appear; the store gives no
    /// snapshot guarantee and none is needed here.
    pub async fn get_activity(&self, author: ObjectId) -> Result<Vec<Reply>> {
        const OP: &str = "get_activity";

        let own: Vec<Thread> = self
            .threads
            .find(own_threads_predicate(author).into_document())
            .await
            .map_err(|e| PersistError::store(OP, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let candidates = assemble::collect_reply_candidates(&own);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Natural retrieval order, not re-sorted by time.
        let replies: Vec<Thread> = self
            .threads
            .find(activity_predicate(author, candidates).into_document())
            .await
            .map_err(|e| PersistError::store(OP, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let mut author_ids: Vec<ObjectId> = replies.iter().map(|t| t.author).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.assembler.fetch_users_by_id(OP, &author_ids).await?;

        tracing::debug!(own = own.len(), replies = replies.len(), "activity aggregated");
        Ok(assemble::join_reply_authors(replies, &authors))
    }
}

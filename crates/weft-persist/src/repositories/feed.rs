use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use weft_types::{Page, Pagination};

use crate::assemble::ThreadTreeAssembler;
use crate::error::{PersistError, Result};
use crate::models::{FeedPost, Thread, User, UserPostTree};
use crate::query::Predicate;

/// Filter admitting only top-level threads: `parent_id` null or absent.
pub fn top_level_predicate() -> Predicate {
    Predicate::NullOrAbsent("parent_id")
}

/// Read side of the post feed: the global feed and per-user post trees.
#[derive(Clone)]
pub struct PostFeedReader {
    threads: Collection<Thread>,
    users: Collection<User>,
    assembler: ThreadTreeAssembler,
}

impl PostFeedReader {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        let threads: Collection<Thread> = db.collection("threads");
        let users: Collection<User> = db.collection("users");
        let assembler = ThreadTreeAssembler::new(threads.clone(), users.clone());
        Self {
            threads,
            users,
            assembler,
        }
    }

    /// Global feed: top-level threads, newest first, one page. Each post
    /// carries its full author and its replies with author previews.
    pub async fn fetch_global_feed(&self, pagination: Pagination) -> Result<Page<FeedPost>> {
        const OP: &str = "fetch_global_feed";
        let filter = top_level_predicate().into_document();

        let total = self
            .threads
            .count_documents(filter.clone())
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let roots: Vec<Thread> = self
            .threads
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(pagination.skip())
            .limit(pagination.limit())
            .await
            .map_err(|e| PersistError::store(OP, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let returned = roots.len();
        let posts = self.assembler.assemble(OP, roots).await?;
        tracing::debug!(total, returned, page = pagination.page_number(), "global feed fetched");

        Ok(Page::new(posts, pagination.has_next(total, returned)))
    }

    /// Every thread a user authored, in authorship order, children joined one
    /// level deep. `None` when no user carries the external id.
    pub async fn fetch_user_post_tree(&self, user_id: &str) -> Result<Option<UserPostTree>> {
        const OP: &str = "fetch_user_post_tree";

        let Some(user) = self
            .users
            .find_one(Predicate::Eq("id", user_id.into()).into_document())
            .await
            .map_err(|e| PersistError::store(OP, e))?
        else {
            return Ok(None);
        };

        let owned = self.assembler.fetch_threads_by_id(OP, &user.threads).await?;
        // Re-order the fetched set by the user's threads list, which is the
        // authorship order.
        let ordered: Vec<Thread> = user
            .threads
            .iter()
            .filter_map(|id| owned.get(id).cloned())
            .collect();

        let posts = self.assembler.assemble(OP, ordered).await?;
        Ok(Some(UserPostTree { user, posts }))
    }

    /// A single thread with author and children joined. `None` when absent.
    pub async fn fetch_thread(&self, id: ObjectId) -> Result<Option<FeedPost>> {
        const OP: &str = "fetch_thread";

        let Some(thread) = self
            .threads
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| PersistError::store(OP, e))?
        else {
            return Ok(None);
        };

        let mut posts = self.assembler.assemble(OP, vec![thread]).await?;
        Ok(posts.pop())
    }
}

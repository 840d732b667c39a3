use std::sync::Arc;

use mongodb::Client;
use weft_types::{NullSink, RevalidationSink};

use crate::error::{PersistError, Result};
use crate::repositories::{
    ActivityAggregator, PostFeedReader, ThreadRepository, UserDirectory, UserRepository,
};

/// Entry point to the feed layer. Constructed once at process startup and
/// passed to callers; there is no hidden process-wide connection.
pub struct FeedClient {
    feed: PostFeedReader,
    directory: UserDirectory,
    activity: ActivityAggregator,
    users: UserRepository,
    threads: ThreadRepository,
}

impl FeedClient {
    pub async fn new(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        Self::with_sink(mongodb_uri, db_name, Arc::new(NullSink)).await
    }

    pub async fn with_sink(
        mongodb_uri: &str,
        db_name: &str,
        sink: Arc<dyn RevalidationSink>,
    ) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            feed: PostFeedReader::new(&client, db_name),
            directory: UserDirectory::new(&client, db_name),
            activity: ActivityAggregator::new(&client, db_name),
            users: UserRepository::new(&client, db_name, Arc::clone(&sink)),
            threads: ThreadRepository::new(&client, db_name, sink),
        })
    }

    pub fn feed(&self) -> &PostFeedReader {
        &self.feed
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn activity(&self) -> &ActivityAggregator {
        &self.activity
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn threads(&self) -> &ThreadRepository {
        &self.threads
    }
}

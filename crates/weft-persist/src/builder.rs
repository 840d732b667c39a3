use std::sync::Arc;

use weft_types::{NullSink, RevalidationSink, StoreConfig};

use crate::error::{PersistError, Result};
use crate::FeedClient;

pub struct FeedClientBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
    revalidation_sink: Option<Arc<dyn RevalidationSink>>,
}

impl FeedClientBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
            revalidation_sink: None,
        }
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.mongodb_uri = Some(config.mongodb_uri);
        self.database = Some(config.database);
        self
    }

    pub fn revalidation_sink(mut self, sink: Arc<dyn RevalidationSink>) -> Self {
        self.revalidation_sink = Some(sink);
        self
    }

    pub async fn build(self) -> Result<FeedClient> {
        let mongodb_uri = self
            .mongodb_uri
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self
            .database
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;
        let sink = self
            .revalidation_sink
            .unwrap_or_else(|| Arc::new(NullSink));

        FeedClient::with_sink(&mongodb_uri, &database, sink).await
    }
}

impl Default for FeedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

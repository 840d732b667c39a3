use serde::{Deserialize, Serialize};

/// Connection settings for the document store backing the feed layer.
///
/// Lifecycle of the connection itself is owned by process startup/shutdown;
/// this struct only carries the values handed to the client constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub mongodb_uri: String,
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "weft".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = uri.into();
        self
    }

    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }
}

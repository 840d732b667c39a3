use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    /// Store failure wrapped with the public operation it occurred in.
    #[error("Query failed in {op}: {source}")]
    Store {
        op: &'static str,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Invalid object ID: {0}")]
    InvalidObjectId(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    pub fn store(op: &'static str, source: mongodb::error::Error) -> Self {
        Self::Store { op, source }
    }
}

impl From<weft_types::PaginationError> for PersistError {
    fn from(err: weft_types::PaginationError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;

pub mod assemble;
pub mod builder;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod repositories;

pub use builder::FeedClientBuilder;
pub use client::FeedClient;
pub use error::PersistError;
pub use models::{FeedPost, Reply, Thread, User, UserPostTree, UserPreview, UserProfile};
pub use query::Predicate;
pub use repositories::{
    ActivityAggregator, PostFeedReader, SearchUsersParams, ThreadRepository, UserDirectory,
    UserRepository,
};

use mongodb::bson::oid::ObjectId;

/// Parse a caller-supplied hex id into a storage key.
pub fn parse_object_id(id: &str) -> error::Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| PersistError::InvalidObjectId(id.to_string()))
}

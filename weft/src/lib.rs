//! # Weft - Social-Feed Query Layer for Rust
//!
//! Weft turns raw stored users and threaded posts into paginated, joined,
//! and filtered result sets:
//!
//! - **Global feed**: top-level posts, newest first, authors and replies joined
//! - **Per-user post tree**: everything a user authored, replies one level deep
//! - **User directory**: searchable, paginated, always excluding the asker
//! - **Activity**: replies received on your own posts, never your own replies
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use weft::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FeedClientBuilder::new()
//!         .mongodb_uri("mongodb://localhost:27017")
//!         .database("weft")
//!         .build()
//!         .await?;
//!
//!     let page = client
//!         .feed()
//!         .fetch_global_feed(Pagination::new(1, 20)?)
//!         .await?;
//!     for post in &page.items {
//!         println!("{}: {}", post.author.username, post.text);
//!     }
//!     println!("more pages: {}", page.is_next);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Weft is a small workspace of composable crates:
//!
//! - **weft-types**: pagination windowing, sort order, config, revalidation events
//! - **weft-persist**: MongoDB models, typed query predicates, reference
//!   resolution, and the feed/directory/activity readers
//!
//! The store client is constructed explicitly and handed to callers; nothing
//! in the crate keeps a hidden global connection.

pub use weft_persist;
pub use weft_types;

pub use weft_persist::{
    parse_object_id, ActivityAggregator, FeedClient, FeedClientBuilder, FeedPost, PersistError,
    PostFeedReader, Reply, SearchUsersParams, Thread, ThreadRepository, User, UserDirectory,
    UserPostTree, UserPreview, UserProfile, UserRepository,
};
pub use weft_types::{
    NullSink, Page, Pagination, PaginationError, RevalidationEvent, RevalidationSink, SortOrder,
    StoreConfig,
};

/// Common imports for applications embedding the feed layer.
pub mod prelude {
    pub use crate::{
        FeedClient, FeedClientBuilder, FeedPost, Page, Pagination, PersistError, Reply,
        RevalidationEvent, RevalidationSink, SearchUsersParams, SortOrder, StoreConfig, Thread,
        User, UserPostTree, UserPreview, UserProfile,
    };
}

mod activity;
mod directory;
mod feed;
mod threads;
mod users;

pub use activity::{activity_predicate, own_threads_predicate, ActivityAggregator};
pub use directory::{directory_predicate, SearchUsersParams, UserDirectory};
pub use feed::{top_level_predicate, PostFeedReader};
pub use threads::ThreadRepository;
pub use users::UserRepository;

mod thread;
mod user;
mod views;

pub use thread::Thread;
pub use user::{User, UserProfile};
pub use views::{FeedPost, Reply, UserPostTree, UserPreview};

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use super::{Thread, User};

/// Minimal author join attached to replies. Narrower than the full `User`
/// join used on feed posts themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPreview {
    pub id: ObjectId,
    pub name: String,
    pub image: String,
}

impl From<&User> for UserPreview {
    fn from(user: &User) -> Self {
        Self {
            id: user.key,
            name: user.name.clone(),
            image: user.image.clone(),
        }
    }
}

/// A reply thread joined with its author preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub id: ObjectId,
    pub text: String,
    pub parent_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub author: UserPreview,
}

impl Reply {
    pub fn new(thread: &Thread, author: UserPreview) -> Self {
        Self {
            id: thread.id,
            text: thread.text.clone(),
            parent_id: thread.parent_id,
            created_at: thread.created_at,
            author,
        }
    }
}

/// A thread joined with its full author and one level of replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedPost {
    pub id: ObjectId,
    pub text: String,
    pub parent_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub author: User,
    pub children: Vec<Reply>,
}

/// A user plus every thread they authored, children joined one level deep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPostTree {
    pub user: User,
    pub posts: Vec<FeedPost>,
}

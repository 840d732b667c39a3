use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored user. `id` is the stable external identifier (issued by the
/// auth collaborator), distinct from the storage-assigned `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub key: ObjectId,
    pub id: String,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub image: String,
    pub onboarded: bool,
    /// Threads this user authored, in authorship order. Append-only.
    #[serde(default)]
    pub threads: Vec<ObjectId>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Profile fields accepted by the upsert write path.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub image: String,
}

impl UserProfile {
    /// Username as stored: lowercased on write so directory search stays
    /// case-insensitive against a single canonical form.
    pub fn normalized_username(&self) -> String {
        self.username.to_lowercase()
    }
}

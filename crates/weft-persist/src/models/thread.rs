use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored post, top-level or reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub text: String,
    pub author: ObjectId,
    /// Absent on a top-level thread; set on a reply. Mirrored by an entry in
    /// the parent's `children`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ObjectId>,
    /// Replies to this thread, in reply order. Append-only.
    #[serde(default)]
    pub children: Vec<ObjectId>,
    /// Sole sort key for feeds; stored as a BSON datetime so the store can
    /// order and compare it.
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Reserved; always absent in current scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<ObjectId>,
}

impl Thread {
    /// Top-level threads are the only ones eligible for the global feed.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

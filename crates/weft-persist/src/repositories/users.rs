use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::{Client, Collection};
use weft_types::{RevalidationEvent, RevalidationSink};

use crate::error::{PersistError, Result};
use crate::models::{User, UserProfile};
use crate::query::Predicate;

/// User lookups and the profile upsert.
#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
    sink: Arc<dyn RevalidationSink>,
}

impl UserRepository {
    pub fn new(client: &Client, db_name: &str, sink: Arc<dyn RevalidationSink>) -> Self {
        let users = client.database(db_name).collection("users");
        Self { users, sink }
    }

    /// Single-entity lookup by external id. Absence is a normal outcome.
    pub async fn fetch_user(&self, user_id: &str) -> Result<Option<User>> {
        const OP: &str = "fetch_user";
        self.users
            .find_one(Predicate::Eq("id", user_id.into()).into_document())
            .await
            .map_err(|e| PersistError::store(OP, e))
    }

    /// Create-or-update keyed on the external id. The username is lowercased
    /// on write; `created_at` and the thread list are set on first insert
    /// only.
    pub async fn upsert_user(&self, profile: UserProfile, path: &str) -> Result<()> {
        const OP: &str = "upsert_user";

        let filter = doc! { "id": &profile.user_id };
        let update = doc! {
            "$set": {
                "username": profile.normalized_username(),
                "name": &profile.name,
                "bio": &profile.bio,
                "image": &profile.image,
                "onboarded": true,
            },
            "$setOnInsert": {
                "threads": [],
                "created_at": bson::DateTime::now(),
            },
        };

        self.users
            .update_one(filter, update)
            .upsert(true)
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        // Only the profile-edit view caches this data.
        if path == "/profile/edit" {
            self.sink.revalidate(RevalidationEvent::new(path)).await;
        }
        Ok(())
    }
}

use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use weft_types::{Page, Pagination, SortOrder};

use crate::error::{PersistError, Result};
use crate::models::User;
use crate::query::{sort_value, Predicate};

/// Parameters for a directory search. The acting user is always excluded
/// from their own listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchUsersParams {
    pub current_user_id: String,
    pub search_string: String,
    pub pagination: Pagination,
    pub sort_by: SortOrder,
}

impl SearchUsersParams {
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            search_string: String::new(),
            pagination: Pagination::default(),
            sort_by: SortOrder::Descending,
        }
    }

    pub fn with_search_string(mut self, search: impl Into<String>) -> Self {
        self.search_string = search.into();
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_sort_by(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }
}

/// Directory filter: never the acting user; when a search string is present,
/// case-insensitive substring match on username or display name.
///
/// A search string of exactly one space is treated like an empty one. That
/// mirrors the behavior the product shipped with; pending confirmation it is
/// kept rather than widened to full whitespace trimming.
pub fn directory_predicate(current_user_id: &str, search_string: &str) -> Predicate {
    let mut clauses = vec![Predicate::Ne("id", current_user_id.into())];
    if !search_string.is_empty() && search_string != " " {
        clauses.push(Predicate::Any(vec![
            Predicate::Contains("username", search_string.to_string()),
            Predicate::Contains("name", search_string.to_string()),
        ]));
    }
    Predicate::All(clauses)
}

/// Searchable, paginated user listing.
#[derive(Clone)]
pub struct UserDirectory {
    users: Collection<User>,
}

impl UserDirectory {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let users = client.database(db_name).collection("users");
        Self { users }
    }

    pub async fn search_users(&self, params: SearchUsersParams) -> Result<Page<User>> {
        const OP: &str = "search_users";
        let filter =
            directory_predicate(&params.current_user_id, &params.search_string).into_document();

        let total = self
            .users
            .count_documents(filter.clone())
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let users: Vec<User> = self
            .users
            .find(filter)
            .sort(doc! { "created_at": sort_value(params.sort_by) })
            .skip(params.pagination.skip())
            .limit(params.pagination.limit())
            .await
            .map_err(|e| PersistError::store(OP, e))?
            .try_collect()
            .await
            .map_err(|e| PersistError::store(OP, e))?;

        let returned = users.len();
        tracing::debug!(total, returned, search = %params.search_string, "directory searched");

        Ok(Page::new(users, params.pagination.has_next(total, returned)))
    }
}

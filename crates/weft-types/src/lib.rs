pub mod config;
pub mod events;
pub mod pagination;

pub use config::StoreConfig;
pub use events::{NullSink, RevalidationEvent, RevalidationSink};
pub use pagination::{Page, Pagination, PaginationError, SortOrder};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid pagination argument: {0}")]
    InvalidArgument(String),
}

/// Page/size windowing over a counted result set.
///
/// `skip` is the number of items before the requested page; `has_next`
/// derives the "more pages exist" flag from the total matching count and the
/// number of items the store actually returned (the store caps at
/// `page_size`, so `returned <= page_size`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page_number: u32,
    page_size: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Both arguments must be >= 1.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page_number < 1 {
            return Err(PaginationError::InvalidArgument(format!(
                "page_number must be >= 1, got {}",
                page_number
            )));
        }
        if page_size < 1 {
            return Err(PaginationError::InvalidArgument(format!(
                "page_size must be >= 1, got {}",
                page_size
            )));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip: `(page_number - 1) * page_size`.
    pub fn skip(&self) -> u64 {
        (self.page_number as u64 - 1) * self.page_size as u64
    }

    /// Store-side fetch cap for this page.
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    /// True iff more matching items exist past this page.
    pub fn has_next(&self, total: u64, returned: usize) -> bool {
        total > self.skip() + returned as u64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Sort direction for a single-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// One page of a windowed result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub is_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, is_next: bool) -> Self {
        Self { items, is_next }
    }
}

//! Pagination DTOs

use serde::{Deserialize, Serialize};

/// Pagination block returned by list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next_page_token: String,
}

/// One page of a listed collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Cursor for the following page; absent or empty on the last page
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// Creates the final page of a collection
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Returns the cursor for the next page, if there is one
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    pub(crate) fn from_listing(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self::new(items, pagination.map(|p| p.next_page_token))
    }
}

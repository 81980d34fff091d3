//! Paginator
//!
//! Drains a cursor-paged collection into one ordered list.

use std::future::Future;

use hangar_core::dto::pagination::Page;
use tracing::debug;

use crate::error::{Result, SyncError};

/// Fetches every page of a collection
///
/// Starts without a cursor and follows `next_page_token` until it is absent
/// or empty. Items are kept in arrival order and never deduplicated.
///
/// # Arguments
/// * `max_pages` - Most pages this listing may fetch
/// * `fetch_page` - Fetches the page at the given cursor
///
/// # Returns
/// All items, or [`SyncError::PaginationLimitExceeded`] if the service is
/// still handing out cursors after `max_pages` pages
pub async fn list_all<T, E, F, Fut>(max_pages: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = std::result::Result<Page<T>, E>>,
    SyncError: From<E>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(cursor.take()).await?;
        pages += 1;

        let next = page.next_cursor().map(str::to_owned);
        debug!(
            "Fetched page {} ({} item(s), more: {})",
            pages,
            page.items.len(),
            next.is_some()
        );
        items.extend(page.items);

        match next {
            None => return Ok(items),
            Some(_) if pages >= max_pages => {
                return Err(SyncError::PaginationLimitExceeded(max_pages));
            }
            Some(token) => cursor = Some(token),
        }
    }
}

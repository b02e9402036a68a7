//! Page-number pagination over any [`PageSource`]
//!
//! Each call performs two reads against the source: the window fetch and
//! the row count. They are not a snapshot; if rows are written between the
//! two reads, `total_count` and `items` may disagree. Nothing is cached, so
//! every call hits the store again.

use tracing::{debug, warn};

use crate::application::ports::PageSource;
use crate::shared::{PageRequest, PageResult, PaginationError};

/// Fetch page `page_number` (1-based) of `page_size` rows from `source`.
///
/// Zero for either argument fails with `InvalidArgument` before the source
/// is touched. A page past the end is not an error: it comes back with no
/// items and the real `total_count` / `total_pages`. Source errors are
/// returned unchanged in `PaginationError::Source`.
pub async fn paginate<S>(
    source: &S,
    page_number: u64,
    page_size: u64,
) -> Result<PageResult<S::Item>, PaginationError<S::Error>>
where
    S: PageSource + ?Sized,
{
    let request = PageRequest::new(page_number, page_size)?;
    paginate_request(source, request).await
}

/// Same as [`paginate`] for an already validated request.
pub async fn paginate_request<S>(
    source: &S,
    request: PageRequest,
) -> Result<PageResult<S::Item>, PaginationError<S::Error>>
where
    S: PageSource + ?Sized,
{
    let offset = request.offset();
    let page_size = request.page_size();

    let mut items = source
        .fetch_window(offset, page_size)
        .await
        .map_err(PaginationError::Source)?;
    let total_count = source.count().await.map_err(PaginationError::Source)?;

    if items.len() as u64 > page_size {
        warn!(
            returned = items.len(),
            page_size, "Source returned more rows than requested, truncating"
        );
        items.truncate(page_size as usize);
    }

    debug!(
        page_number = request.page_number(),
        page_size,
        offset,
        items = items.len(),
        total_count,
        "Page fetched"
    );

    Ok(PageResult::new(items, total_count, request))
}

//! Page request and page result types

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::InvalidPageRequest;

/// A validated pagination request.
///
/// Both fields are 1-based and non-zero; a `PageRequest` can only be built
/// through [`PageRequest::new`], so holding one means the values were checked.
/// Deserialization goes through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page_number: u64,
    page_size: u64,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = InvalidPageRequest;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        PageRequest::new(raw.page_number, raw.page_size)
    }
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64) -> Result<Self, InvalidPageRequest> {
        if page_number < 1 {
            return Err(InvalidPageRequest::PageNumber(page_number));
        }
        if page_size < 1 {
            return Err(InvalidPageRequest::PageSize(page_size));
        }
        // Reject requests whose offset does not fit in u64
        if (page_number - 1).checked_mul(page_size).is_none() {
            return Err(InvalidPageRequest::OffsetOverflow {
                page_number,
                page_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip before the first row of this page.
    pub fn offset(&self) -> u64 {
        // Checked in `new`
        (self.page_number - 1) * self.page_size
    }
}

/// Number of pages needed to hold `total_count` rows.
///
/// Integer ceiling division; `0` rows means `0` pages. `page_size` must be
/// non-zero, which every `PageRequest` guarantees.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    total_count.div_ceil(page_size)
}

/// Paginated result
///
/// Serializes as
/// `{"items": [...], "total_count": n, "page_number": n, "page_size": n, "total_pages": n}`.
/// Deserializing rejects a page whose `total_pages` does not match
/// `total_count` / `page_size`, or whose `items` exceed `page_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageResult<T> {
    /// Rows on the current page, in source order
    pub items: Vec<T>,
    /// Total number of rows across all pages
    pub total_count: u64,
    /// Current page (1-based)
    pub page_number: u64,
    /// Requested page size
    pub page_size: u64,
    /// Total number of pages
    pub total_pages: u64,
}

#[derive(Deserialize)]
struct RawPageResult<T> {
    items: Vec<T>,
    total_count: u64,
    page_number: u64,
    page_size: u64,
    total_pages: u64,
}

impl<'de, T> Deserialize<'de> for PageResult<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPageResult::<T>::deserialize(deserializer)?;
        let request =
            PageRequest::new(raw.page_number, raw.page_size).map_err(de::Error::custom)?;

        if raw.items.len() as u64 > raw.page_size {
            return Err(de::Error::custom(format!(
                "page holds {} items but page_size is {}",
                raw.items.len(),
                raw.page_size
            )));
        }

        let expected = total_pages(raw.total_count, raw.page_size);
        if raw.total_pages != expected {
            return Err(de::Error::custom(format!(
                "total_pages is {} but {} rows at page_size {} make {}",
                raw.total_pages, raw.total_count, raw.page_size, expected
            )));
        }

        Ok(PageResult::new(raw.items, raw.total_count, request))
    }
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_pages: total_pages(total_count, request.page_size()),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Convert every item while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Whether the page right before this one holds rows.
    ///
    /// False on page 1, on an empty set, and for pages more than one past
    /// the last page (page 5 of 3 has an empty page 4 before it).
    pub fn has_previous(&self) -> bool {
        self.page_number > 1 && self.page_number - 1 <= self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

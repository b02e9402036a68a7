//! # sea-paginate
//!
//! Page-number / page-size pagination for SeaORM entity queries.
//!
//! Given a 1-based page number and a page size, a query returns one page of
//! rows plus the total row count and total page count:
//!
//! ```json
//! {"items": [...], "total_count": 25, "page_number": 1, "page_size": 10, "total_pages": 3}
//! ```
//!
//! ## Layout
//!
//! - **shared**: `PageRequest`, `PageResult`, error types, caller parameter resolution
//! - **application**: the `PageSource` port and the `paginate` service
//! - **infrastructure**: the SeaORM adapter and an in-memory source
//! - **config**: default and maximum page sizes
//!
//! Each call issues two reads (a window fetch and a count) that are not a
//! snapshot; concurrent writes between them can make `total_count` and
//! `items` disagree.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod shared;

pub use application::{paginate, paginate_request, PageSource};
pub use config::PaginationConfig;
pub use infrastructure::{EntityPaginateExt, PaginateExt, SelectSource, SliceSource};
pub use shared::{
    total_pages, ConfigError, DbPaginationError, InvalidPageRequest, PageRequest, PageResult,
    PaginationError, PaginationParams,
};

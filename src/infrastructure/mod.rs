//! Infrastructure layer - concrete page sources

pub mod database;
pub mod storage;

pub use database::{EntityPaginateExt, PaginateExt, SelectSource};
pub use storage::SliceSource;

#[cfg(test)]
pub mod entities;
pub mod select_source;

pub use select_source::{EntityPaginateExt, PaginateExt, SelectSource};

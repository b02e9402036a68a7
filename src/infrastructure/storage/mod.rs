//! Non-database page sources

pub mod memory;

pub use memory::SliceSource;

//! Entities used by the database tests, one per primary key shape

pub mod membership;
pub mod post;
pub mod token;

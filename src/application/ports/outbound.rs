//! Outbound ports — the data access capability pagination runs against
//!
//! [`PageSource`] decouples the paginator from the concrete store. The
//! production implementation wraps a SeaORM query
//! ([`SelectSource`](crate::infrastructure::database::SelectSource)); an
//! in-memory one lives in
//! [`SliceSource`](crate::infrastructure::storage::SliceSource).

use async_trait::async_trait;

/// A collection that can report its size and return a contiguous window.
///
/// Rows must come back in a stable order across calls; establishing that
/// order (e.g. by primary key) is the implementor's job.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Error: Send;

    /// Total number of rows in the collection.
    async fn count(&self) -> Result<u64, Self::Error>;

    /// At most `limit` rows starting at position `offset`.
    async fn fetch_window(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, Self::Error>;
}


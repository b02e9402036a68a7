//! In-memory page source

use std::convert::Infallible;

use async_trait::async_trait;

use crate::application::ports::PageSource;

/// Pages over a borrowed slice, in slice order
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a, T> {
    rows: &'a [T],
}

impl<'a, T> SliceSource<'a, T> {
    pub fn new(rows: &'a [T]) -> Self {
        Self { rows }
    }
}

impl<'a, T> From<&'a [T]> for SliceSource<'a, T> {
    fn from(rows: &'a [T]) -> Self {
        Self::new(rows)
    }
}

impl<'a, T> From<&'a Vec<T>> for SliceSource<'a, T> {
    fn from(rows: &'a Vec<T>) -> Self {
        Self::new(rows.as_slice())
    }
}

#[async_trait]
impl<'a, T> PageSource for SliceSource<'a, T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Error = Infallible;

    async fn count(&self) -> Result<u64, Infallible> {
        Ok(self.rows.len() as u64)
    }

    async fn fetch_window(&self, offset: u64, limit: u64) -> Result<Vec<T>, Infallible> {
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.rows.len());
        let len = usize::try_from(limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(self.rows.len());
        Ok(self.rows[start..end].to_vec())
    }
}

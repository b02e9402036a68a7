use serde::Deserialize;
use tracing::debug;

use crate::config::PaginationConfig;
use crate::shared::{InvalidPageRequest, PageRequest};

/// Pagination query parameters as supplied by a caller.
///
/// Both fields are optional; see [`PaginationParams::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationParams {
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self { page, page_size }
    }

    /// Turn caller input into a validated request.
    ///
    /// A missing page means page 1, a missing size means the configured
    /// default, and sizes above the configured maximum are clamped. An
    /// explicit zero is rejected rather than rewritten.
    pub fn resolve(&self, config: &PaginationConfig) -> Result<PageRequest, InvalidPageRequest> {
        let page = self.page.unwrap_or(1);
        let mut page_size = self.page_size.unwrap_or(config.default_page_size);

        if page_size > config.max_page_size {
            debug!(
                requested = page_size,
                max = config.max_page_size,
                "Clamping page size"
            );
            page_size = config.max_page_size;
        }

        PageRequest::new(page, page_size)
    }
}

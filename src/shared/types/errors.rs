use thiserror::Error;

/// A page number or page size outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageRequest {
    #[error("page number must be at least 1, got {0}")]
    PageNumber(u64),

    #[error("page size must be at least 1, got {0}")]
    PageSize(u64),

    #[error("offset for page {page_number} with page size {page_size} overflows")]
    OffsetOverflow { page_number: u64, page_size: u64 },
}

/// Failure of a pagination call.
///
/// `E` is the error type of the backing store and is carried unchanged.
#[derive(Debug, Error)]
pub enum PaginationError<E> {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidPageRequest),

    #[error(transparent)]
    Source(E),
}

impl<E> PaginationError<E> {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PaginationError::InvalidArgument(_))
    }

    /// The backing store error, if the failure came from the store.
    pub fn into_source(self) -> Option<E> {
        match self {
            PaginationError::Source(err) => Some(err),
            PaginationError::InvalidArgument(_) => None,
        }
    }
}

/// Pagination error over a SeaORM query.
pub type DbPaginationError = PaginationError<sea_orm::DbErr>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

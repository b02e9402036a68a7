pub mod paginator;

pub use paginator::{paginate, paginate_request};

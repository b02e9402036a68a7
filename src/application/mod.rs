pub mod ports;
pub mod services;

pub use ports::PageSource;
pub use services::{paginate, paginate_request};

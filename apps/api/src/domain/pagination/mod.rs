// Pagination domain module
// Page descriptors, page results and count elision

pub mod executor;
pub mod page;
pub mod page_request;

// Re-export main types for convenience
pub use executor::{elided_total, fit_to_limit, get_page};
pub use page::Page;
pub use page_request::{PageError, PageRequest};

use serde::Serialize;
use thiserror::Error;

/// Precondition violations of a page request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Page size must be positive, got {0}")]
    InvalidLimit(i64),

    #[error("Offset cannot be negative, got {0}")]
    NegativeOffset(i64),

    #[error("Page number cannot be negative, got {0}")]
    NegativePage(i64),

    #[error("Page {page} of size {size} is out of range")]
    Overflow { page: i64, size: i64 },
}

/// Offset/limit window of a content query
///
/// # Invariants
/// - `limit > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
}

impl PageRequest {
    /// Creates a page request from a raw offset and limit
    ///
    /// # Example
    /// ```
    /// use member_search_api::domain::pagination::PageRequest;
    ///
    /// let request = PageRequest::new(100, 10).expect("valid request");
    /// assert_eq!(request.page_number(), 10);
    ///
    /// assert!(PageRequest::new(0, 0).is_err());
    /// ```
    pub fn new(offset: i64, limit: i64) -> Result<Self, PageError> {
        if limit <= 0 {
            return Err(PageError::InvalidLimit(limit));
        }
        if offset < 0 {
            return Err(PageError::NegativeOffset(offset));
        }

        Ok(Self {
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// Creates a request for the zero-based `page` of `size` rows
    pub fn of(page: i64, size: i64) -> Result<Self, PageError> {
        if size <= 0 {
            return Err(PageError::InvalidLimit(size));
        }
        if page < 0 {
            return Err(PageError::NegativePage(page));
        }

        let offset = page
            .checked_mul(size)
            .ok_or(PageError::Overflow { page, size })?;
        Self::new(offset, size)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Zero-based page number this window starts in
    pub fn page_number(&self) -> u64 {
        self.offset / self.limit
    }
}

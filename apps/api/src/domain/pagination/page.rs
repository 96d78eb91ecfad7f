use super::page_request::PageRequest;

/// One page of query results
///
/// `total` is the number of rows matching the query across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            content,
            total,
            request,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn number(&self) -> u64 {
        self.request.page_number()
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.limit())
    }

    pub fn is_first(&self) -> bool {
        self.request.offset() == 0
    }

    /// Whether rows remain past the end of this window
    pub fn has_next(&self) -> bool {
        self.request.offset() + (self.content.len() as u64) < self.total
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 103, PageRequest::new(100, 10).unwrap());
        assert_eq!(page.total_pages(), 11);
        assert_eq!(page.number(), 10);
        assert!(page.is_last());
        assert!(!page.is_first());
    }

    #[test]
    fn first_full_page_has_next() {
        let page = Page::new((0..10).collect(), 25, PageRequest::of(0, 10).unwrap());
        assert!(page.is_first());
        assert!(page.has_next());
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn empty_page() {
        let page: Page<i32> = Page::new(Vec::new(), 0, PageRequest::of(0, 10).unwrap());
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_last());
        assert!(page.content().is_empty());
    }

    #[test]
    fn unaligned_offset_reaching_the_end_is_last() {
        let page = Page::new((0..7).collect(), 12, PageRequest::new(5, 10).unwrap());
        assert!(!page.has_next());
        assert!(page.is_last());
    }

    #[test]
    fn unaligned_offset_short_of_the_end_has_next() {
        let page = Page::new((0..10).collect(), 20, PageRequest::new(5, 10).unwrap());
        assert!(page.has_next());
        assert!(!page.is_last());
    }
}

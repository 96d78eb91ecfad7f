//! Page assembly with count elision
//!
//! A page needs the total number of matching rows. Counting is a second
//! full scan, so the count query is only run when the content of the page
//! cannot tell the total on its own:
//!
//! - first page, not full: total = content length
//! - later page, not full and not empty: total = offset + content length
//! - anything else: run the count query

use std::future::Future;

use super::page::Page;
use super::page_request::PageRequest;

/// Total implied by the page shape, or `None` when a count is required
pub fn elided_total(request: PageRequest, content_len: usize) -> Option<u64> {
    let len = content_len as u64;
    if len >= request.limit() {
        return None;
    }

    if request.offset() == 0 {
        Some(len)
    } else if len > 0 {
        Some(request.offset() + len)
    } else {
        None
    }
}

/// Drops rows a collaborator returned past the requested limit
pub fn fit_to_limit<T>(mut content: Vec<T>, request: PageRequest) -> Vec<T> {
    let limit = request.limit();
    if content.len() as u64 > limit {
        tracing::warn!(
            returned = content.len(),
            limit,
            "content query returned more rows than requested, truncating"
        );
        content.truncate(limit as usize);
    }
    content
}

/// Builds a page from already fetched content
///
/// `count` is invoked at most once, and only when [`elided_total`] cannot
/// derive the total. Its error is returned unchanged.
///
/// # Example
/// ```
/// use member_search_api::domain::pagination::{get_page, PageRequest};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let page = rt.block_on(get_page(
///     vec!["a", "b", "c"],
///     PageRequest::new(0, 10).unwrap(),
///     || async { Err::<u64, String>("count must not run".to_string()) },
/// ));
/// assert_eq!(page.unwrap().total(), 3);
/// ```
pub async fn get_page<T, E, F, Fut>(
    content: Vec<T>,
    request: PageRequest,
    count: F,
) -> Result<Page<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<u64, E>>,
{
    let limit = request.limit();
    let content = fit_to_limit(content, request);

    let total = match elided_total(request, content.len()) {
        Some(total) => {
            tracing::debug!(
                offset = request.offset(),
                limit,
                total,
                "count query elided"
            );
            total
        }
        None => count().await?,
    };

    Ok(Page::new(content, total, request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(offset: i64, limit: i64) -> PageRequest {
        PageRequest::new(offset, limit).unwrap()
    }

    #[test]
    fn first_page_not_full_is_elided() {
        assert_eq!(elided_total(request(0, 10), 3), Some(3));
        assert_eq!(elided_total(request(0, 10), 0), Some(0));
    }

    #[test]
    fn last_page_not_full_is_elided() {
        assert_eq!(elided_total(request(100, 10), 3), Some(103));
    }

    #[test]
    fn full_page_needs_count() {
        assert_eq!(elided_total(request(0, 10), 10), None);
        assert_eq!(elided_total(request(20, 10), 10), None);
    }

    #[test]
    fn empty_page_past_first_needs_count() {
        assert_eq!(elided_total(request(30, 10), 0), None);
    }

    #[tokio::test]
    async fn count_runs_for_full_page() {
        let calls = AtomicUsize::new(0);
        let page = get_page((0..10).collect::<Vec<_>>(), request(0, 10), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(25)
        })
        .await
        .unwrap();

        assert_eq!(page.total(), 25);
        assert_eq!(page.content().len(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn count_skipped_for_partial_page() {
        let calls = AtomicUsize::new(0);
        let page = get_page(vec![1, 2, 3], request(100, 10), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(0)
        })
        .await
        .unwrap();

        assert_eq!(page.total(), 103);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn count_error_propagates() {
        let result = get_page(vec![1; 10], request(0, 10), || async {
            Err::<u64, _>("connection reset".to_string())
        })
        .await;

        assert_eq!(result.unwrap_err(), "connection reset");
    }

    #[test]
    fn fit_to_limit_keeps_short_content() {
        assert_eq!(fit_to_limit(vec![1, 2, 3], request(0, 10)), vec![1, 2, 3]);
        assert_eq!(fit_to_limit(vec![1; 12], request(0, 10)).len(), 10);
    }

    #[tokio::test]
    async fn oversized_content_is_truncated() {
        let page = get_page(vec![1; 12], request(0, 10), || async { Ok::<_, String>(12) })
            .await
            .unwrap();

        assert_eq!(page.content().len(), 10);
        assert_eq!(page.total(), 12);
    }
}

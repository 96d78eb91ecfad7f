use std::sync::Arc;

use super::criteria::MemberSearchCondition;
use super::order::OrderSpec;
use crate::domain::member::MemberTeamRow;
use crate::domain::pagination::{fit_to_limit, get_page, Page, PageRequest};
use crate::domain::repositories::{MemberQueryRepository, RepositoryError};

/// Member search entry points
///
/// Turns search criteria into a condition and drives the query repository.
/// Each paged call issues the content query first and at most one count
/// query after it.
pub struct MemberSearchService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for MemberSearchService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: MemberQueryRepository + ?Sized> MemberSearchService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Every matching row, unpaged
    pub async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, RepositoryError> {
        self.repository
            .fetch_rows(&condition.to_condition(), &[], 0, None)
            .await
    }

    /// Same as [`Self::search`], composing the filter with a builder
    pub async fn search_by_builder(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamRow>, RepositoryError> {
        self.repository
            .fetch_rows(&condition.to_condition_with_builder(), &[], 0, None)
            .await
    }

    /// Content query followed by an unconditional count query
    pub async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        request: PageRequest,
        order: &[OrderSpec],
    ) -> Result<Page<MemberTeamRow>, RepositoryError> {
        let filter = condition.to_condition();
        let content = self
            .repository
            .fetch_rows(&filter, order, request.offset(), Some(request.limit()))
            .await?;
        let content = fit_to_limit(content, request);
        let total = self.repository.count_rows(&filter).await?;

        Ok(Page::new(content, total, request))
    }

    /// Content query followed by a count query only when the page shape
    /// cannot tell the total
    pub async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        request: PageRequest,
        order: &[OrderSpec],
    ) -> Result<Page<MemberTeamRow>, RepositoryError> {
        let filter = condition.to_condition();
        let content = self
            .repository
            .fetch_rows(&filter, order, request.offset(), Some(request.limit()))
            .await?;

        get_page(content, request, || self.repository.count_rows(&filter)).await
    }
}

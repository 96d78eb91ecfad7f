use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::member::MemberTeamRow;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::search::criteria::blank_as_none;
use crate::domain::search::{MemberSearchCondition, OrderSpec};

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Paging query parameters
///
/// `sort` takes `column[,asc|desc]` keys separated by `;`,
/// e.g. `age,desc;username`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    fn page_request(&self) -> Result<PageRequest, ApiError> {
        let request = PageRequest::of(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;
        Ok(request)
    }

    fn order(&self) -> Result<Vec<OrderSpec>, ApiError> {
        match self.sort.as_deref() {
            Some(sort) => Ok(OrderSpec::parse_list(sort)?),
            None => Ok(Vec::new()),
        }
    }
}

/// Page of rows with its paging metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
    pub offset: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let request = page.request();
        let number = page.number();
        let total = page.total();
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();

        Self {
            page: number,
            size: request.limit(),
            offset: request.offset(),
            content: page.into_content(),
            total,
            total_pages,
            first,
            last,
        }
    }
}

/// Search members without paging
///
/// GET /api/v1/members
pub async fn search_members(
    State(state): State<AppState>,
    condition: Result<Query<MemberSearchCondition>, QueryRejection>,
) -> Result<Json<Vec<MemberTeamRow>>, ApiError> {
    let Query(condition) = condition?;
    let rows = state.search.search(&condition).await?;
    Ok(Json(rows))
}

/// Search members, always counting the total
///
/// GET /api/v2/members
pub async fn search_members_page_simple(
    State(state): State<AppState>,
    condition: Result<Query<MemberSearchCondition>, QueryRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<MemberTeamRow>>, ApiError> {
    let Query(condition) = condition?;
    let Query(params) = params?;
    let request = params.page_request()?;
    let order = params.order()?;

    let page = state
        .search
        .search_page_simple(&condition, request, &order)
        .await?;

    Ok(Json(PageResponse::from(page)))
}

/// Search members, counting the total only when the page cannot tell it
///
/// GET /api/v3/members
pub async fn search_members_page_complex(
    State(state): State<AppState>,
    condition: Result<Query<MemberSearchCondition>, QueryRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<PageResponse<MemberTeamRow>>, ApiError> {
    let Query(condition) = condition?;
    let Query(params) = params?;
    let request = params.page_request()?;
    let order = params.order()?;

    let page = state
        .search
        .search_page_complex(&condition, request, &order)
        .await?;

    Ok(Json(PageResponse::from(page)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::Field;

    #[test]
    fn params_default_to_first_page() {
        let request = PageParams::default().page_request().unwrap();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), DEFAULT_PAGE_SIZE as u64);
    }

    #[test]
    fn params_reject_zero_size() {
        let params = PageParams {
            size: Some(0),
            ..Default::default()
        };
        assert!(params.page_request().is_err());
    }

    #[test]
    fn params_treat_blank_numbers_as_absent() {
        let params: PageParams = serde_json::from_str(r#"{"page":"","size":"5"}"#).unwrap();
        let request = params.page_request().unwrap();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn params_parse_sort() {
        let params = PageParams {
            sort: Some("age,desc".to_string()),
            ..Default::default()
        };
        assert_eq!(params.order().unwrap(), vec![OrderSpec::desc(Field::Age)]);
    }

    #[test]
    fn response_carries_metadata() {
        let page = Page::new(vec![1, 2, 3], 103, PageRequest::new(100, 10).unwrap());
        let response = PageResponse::from(page);
        assert_eq!(response.page, 10);
        assert_eq!(response.size, 10);
        assert_eq!(response.offset, 100);
        assert_eq!(response.total, 103);
        assert_eq!(response.total_pages, 11);
        assert!(!response.first);
        assert!(response.last);
    }
}

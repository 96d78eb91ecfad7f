// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::domain::repositories::MemberQueryRepository;
use crate::domain::search::MemberSearchService;

use handlers::{health, members};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub search: MemberSearchService<dyn MemberQueryRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn MemberQueryRepository>) -> Self {
        Self {
            search: MemberSearchService::new(repository),
        }
    }
}

/// Builds the application routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Member search routes
        .route("/api/v1/members", get(members::search_members))
        .route("/api/v2/members", get(members::search_members_page_simple))
        .route("/api/v3/members", get(members::search_members_page_complex))
        .with_state(state)
}

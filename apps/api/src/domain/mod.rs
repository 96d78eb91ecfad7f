// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod member;
pub mod pagination;
pub mod repositories;
pub mod search;

pub use errors::DomainError;

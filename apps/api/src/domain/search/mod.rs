// Search domain module
// Condition composition, ordering and the member search service

pub mod condition;
pub mod criteria;
pub mod order;
pub mod service;

// Re-export main types for convenience
pub use condition::{Condition, ConditionBuilder, Field};
pub use criteria::MemberSearchCondition;
pub use order::{OrderError, OrderSpec};
pub use service::MemberSearchService;

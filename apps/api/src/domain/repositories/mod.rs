// Repository contracts (ports)
// Implemented by adapters in the infrastructure layer

pub mod errors;
pub mod member_repository;

pub use errors::RepositoryError;
pub use member_repository::{MemberQueryRepository, MemberRepository};

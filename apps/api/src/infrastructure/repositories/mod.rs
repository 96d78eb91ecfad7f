// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_member_repository;
pub mod postgres_member_repository;

pub use in_memory_member_repository::InMemoryMemberRepository;
pub use postgres_member_repository::PostgresMemberRepository;

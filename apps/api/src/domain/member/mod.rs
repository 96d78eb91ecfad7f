// Member domain module
// Contains the member and team entities and the read-only projections
// produced by member queries

#![allow(clippy::module_inception)]

pub mod member;
pub mod projections;
pub mod team;

// Re-export main types for convenience
pub use member::Member;
pub use projections::{AgeStatistics, MemberDto, MemberTeamRow, TeamAgeAverage};
pub use team::Team;

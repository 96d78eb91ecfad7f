use async_trait::async_trait;

use super::errors::RepositoryError;
use crate::domain::member::member::NewMember;
use crate::domain::member::{AgeStatistics, Member, MemberDto, MemberTeamRow, Team, TeamAgeAverage};
use crate::domain::search::{Condition, Field, OrderSpec};

/// Repository trait for the Member and Team entities
///
/// Plain persistence and lookups; filtering lives in [`MemberQueryRepository`].
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a team, returning it with its assigned id
    async fn save_team(&self, name: &str) -> Result<Team, RepositoryError>;

    /// Insert a member, returning it with its assigned id
    async fn save_member(&self, member: &NewMember) -> Result<Member, RepositoryError>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError>;

    /// All members ordered by id
    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Members with exactly this username, ordered by id
    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, RepositoryError>;
}

/// Query facility over the `member LEFT JOIN team` projection
///
/// Implementations execute what they are given: the condition, the order
/// and the offset/limit window are applied as passed, nothing is added.
#[async_trait]
pub trait MemberQueryRepository: Send + Sync {
    /// Filtered, ordered rows starting at `offset`; at most `limit` rows when set
    async fn fetch_rows(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, RepositoryError>;

    /// Number of rows matching the condition
    async fn count_rows(&self, condition: &Condition) -> Result<u64, RepositoryError>;

    /// Username and age of the matching members
    async fn fetch_dtos(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
    ) -> Result<Vec<MemberDto>, RepositoryError>;

    /// Count, sum, average, maximum and minimum of all member ages
    async fn age_statistics(&self) -> Result<AgeStatistics, RepositoryError>;

    /// Average age per team name, ordered by team name
    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, RepositoryError>;

    /// Sets the username of every matching member, returning the rows affected
    async fn bulk_rename(&self, condition: &Condition, username: &str) -> Result<u64, RepositoryError>;

    /// Adds `delta` to every member's age
    async fn bulk_add_age(&self, delta: i32) -> Result<u64, RepositoryError>;

    /// Multiplies every member's age by `factor`
    async fn bulk_multiply_age(&self, factor: i32) -> Result<u64, RepositoryError>;

    /// Deletes every matching member
    async fn bulk_delete(&self, condition: &Condition) -> Result<u64, RepositoryError>;
}

/// Rejects conditions that reference columns outside the member table
pub fn ensure_member_columns(condition: &Condition) -> Result<(), RepositoryError> {
    match find_foreign_field(condition) {
        Some(field) => Err(RepositoryError::UnsupportedCondition(field)),
        None => Ok(()),
    }
}

fn find_foreign_field(condition: &Condition) -> Option<Field> {
    match condition {
        Condition::Compare { field, .. } if !field.is_member_column() => Some(*field),
        Condition::Compare { .. } => None,
        Condition::And(parts) => parts.iter().find_map(find_foreign_field),
    }
}

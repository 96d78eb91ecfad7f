use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::member::member::NewMember;
use crate::domain::member::{AgeStatistics, Member, MemberDto, MemberTeamRow, Team, TeamAgeAverage};
use crate::domain::repositories::member_repository::ensure_member_columns;
use crate::domain::repositories::{MemberQueryRepository, MemberRepository, RepositoryError};
use crate::domain::search::{Condition, OrderSpec};
use crate::infrastructure::sql;

/// PostgreSQL implementation of the member repositories
///
/// Filtered statements are assembled at runtime with `sqlx::QueryBuilder`,
/// so they are checked by PostgreSQL rather than at compile time.
#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn to_count(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count).map_err(|_| RepositoryError::NegativeCount(count))
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

impl PostgresMemberRepository {
    /// Sets every age to `expression`, or leaves all of them untouched when
    /// any result would be negative
    ///
    /// `expression` is trusted SQL over `age` and the bound operand `$1`.
    async fn update_ages(&self, expression: &str, operand: i32) -> Result<u64, RepositoryError> {
        let statement = format!(
            r#"
            WITH lowest AS (
                SELECT MIN({expression})::BIGINT AS age FROM member
            ),
            updated AS (
                UPDATE member SET age = {expression}
                WHERE (SELECT age FROM lowest) >= 0
                RETURNING member_id
            )
            SELECT (SELECT age FROM lowest), (SELECT COUNT(*) FROM updated)
            "#,
            expression = expression,
        );
        tracing::debug!(sql = %statement, operand, "bulk updating ages");

        let (lowest, affected) = sqlx::query_as::<_, (Option<i64>, i64)>(&statement)
            .bind(operand)
            .fetch_one(&self.pool)
            .await?;

        match lowest {
            Some(age) if age < 0 => Err(DomainError::NegativeAge(
                i32::try_from(age).unwrap_or(i32::MIN),
            )
            .into()),
            _ => to_count(affected),
        }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save_team(&self, name: &str) -> Result<Team, RepositoryError> {
        Team::validate_name(name)?;

        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO team (name)
            VALUES ($1)
            RETURNING team_id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    async fn save_member(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        let saved = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO member (username, age, team_id)
            VALUES ($1, $2, $3)
            RETURNING member_id, username, age, team_id
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| match member.team_id() {
            Some(team_id) if is_foreign_key_violation(&error) => {
                RepositoryError::TeamNotFound(team_id)
            }
            _ => RepositoryError::from(error),
        })?;

        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            WHERE member_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            ORDER BY member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT member_id, username, age, team_id
            FROM member
            WHERE username = $1
            ORDER BY member_id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

#[async_trait]
impl MemberQueryRepository for PostgresMemberRepository {
    async fn fetch_rows(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, RepositoryError> {
        let mut query = sql::content_query(condition, order, offset, limit)?;
        tracing::debug!(sql = query.sql(), "fetching member rows");

        let rows = query
            .build_query_as::<MemberTeamRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count_rows(&self, condition: &Condition) -> Result<u64, RepositoryError> {
        let mut query = sql::count_query(condition);
        tracing::debug!(sql = query.sql(), "counting member rows");

        let (count,) = query
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        to_count(count)
    }

    async fn fetch_dtos(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
    ) -> Result<Vec<MemberDto>, RepositoryError> {
        let mut query = sql::dto_query(condition, order);
        tracing::debug!(sql = query.sql(), "fetching member dtos");

        let dtos = query
            .build_query_as::<MemberDto>()
            .fetch_all(&self.pool)
            .await?;

        Ok(dtos)
    }

    async fn age_statistics(&self) -> Result<AgeStatistics, RepositoryError> {
        let (count, sum, avg, max, min) =
            sqlx::query_as::<_, (i64, i64, Option<f64>, Option<i32>, Option<i32>)>(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(age), 0)::BIGINT,
                    AVG(age)::DOUBLE PRECISION,
                    MAX(age),
                    MIN(age)
                FROM member
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(AgeStatistics {
            count: to_count(count)?,
            sum,
            avg,
            max,
            min,
        })
    }

    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, RepositoryError> {
        let averages = sqlx::query_as::<_, TeamAgeAverage>(
            r#"
            SELECT t.name AS team_name, AVG(m.age)::DOUBLE PRECISION AS average_age
            FROM member m
            JOIN team t ON m.team_id = t.team_id
            GROUP BY t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(averages)
    }

    async fn bulk_rename(&self, condition: &Condition, username: &str) -> Result<u64, RepositoryError> {
        ensure_member_columns(condition)?;

        let mut statement = sql::rename_statement(condition, username);
        tracing::debug!(sql = statement.sql(), "bulk renaming members");

        let result = statement.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn bulk_add_age(&self, delta: i32) -> Result<u64, RepositoryError> {
        self.update_ages("age + $1", delta).await
    }

    async fn bulk_multiply_age(&self, factor: i32) -> Result<u64, RepositoryError> {
        self.update_ages("age * $1", factor).await
    }

    async fn bulk_delete(&self, condition: &Condition) -> Result<u64, RepositoryError> {
        ensure_member_columns(condition)?;

        let mut statement = sql::delete_statement(condition);
        tracing::debug!(sql = statement.sql(), "bulk deleting members");

        let result = statement.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

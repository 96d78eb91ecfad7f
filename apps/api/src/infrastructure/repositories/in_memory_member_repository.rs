use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::DomainError;
use crate::domain::member::member::NewMember;
use crate::domain::member::{AgeStatistics, Member, MemberDto, MemberTeamRow, Team, TeamAgeAverage};
use crate::domain::repositories::member_repository::ensure_member_columns;
use crate::domain::repositories::{MemberQueryRepository, MemberRepository, RepositoryError};
use crate::domain::search::order::compare_rows;
use crate::domain::search::{Condition, OrderSpec};

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    members: Vec<Member>,
    last_team_id: i64,
    last_member_id: i64,
}

impl Tables {
    fn team(&self, id: i64) -> Option<&Team> {
        self.teams.iter().find(|team| team.id() == id)
    }

    /// `member LEFT JOIN team`, in member id order
    fn joined_rows(&self) -> Vec<MemberTeamRow> {
        self.members
            .iter()
            .map(|member| {
                let team = member.team_id().and_then(|id| self.team(id));
                MemberTeamRow {
                    member_id: member.id(),
                    username: member.username().map(str::to_string),
                    age: member.age(),
                    team_id: team.map(Team::id),
                    team_name: team.map(|t| t.name().to_string()),
                }
            })
            .collect()
    }

    fn filtered_rows(&self, condition: &Condition, order: &[OrderSpec]) -> Vec<MemberTeamRow> {
        let mut rows: Vec<MemberTeamRow> = self
            .joined_rows()
            .into_iter()
            .filter(|row| condition.matches(row))
            .collect();
        rows.sort_by(|a, b| compare_rows(order, a, b));
        rows
    }

    /// Ids of members matching a member-only condition
    fn matching_member_ids(&self, condition: &Condition) -> Vec<i64> {
        self.joined_rows()
            .into_iter()
            .filter(|row| condition.matches(row))
            .map(|row| row.member_id)
            .collect()
    }

    /// Applies `update` to every age, or to none of them
    fn update_ages(&mut self, update: impl Fn(i32) -> Option<i32>) -> Result<u64, RepositoryError> {
        let mut updated = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let age = update(member.age()).ok_or(RepositoryError::AgeOverflow(member.id()))?;
            updated.push(Member::from_persistence(
                member.id(),
                member.username().map(str::to_string),
                age,
                member.team_id(),
            ));
        }
        if let Some(lowest) = updated.iter().map(Member::age).min().filter(|age| *age < 0) {
            return Err(DomainError::NegativeAge(lowest).into());
        }
        let affected = updated.len() as u64;
        self.members = updated;
        Ok(affected)
    }
}

/// In-process implementation of the member repositories
///
/// Evaluates conditions and orderings in memory with the same semantics
/// the SQL adapter gets from PostgreSQL. Counts the content and count
/// queries it serves so callers can observe which queries ran.
#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    tables: RwLock<Tables>,
    content_queries: AtomicUsize,
    count_queries: AtomicUsize,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `fetch_rows` calls served so far
    pub fn content_query_count(&self) -> usize {
        self.content_queries.load(Ordering::SeqCst)
    }

    /// Number of `count_rows` calls served so far
    pub fn count_query_count(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }

    pub fn reset_query_counts(&self) {
        self.content_queries.store(0, Ordering::SeqCst);
        self.count_queries.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save_team(&self, name: &str) -> Result<Team, RepositoryError> {
        Team::validate_name(name)?;

        let mut tables = self.tables.write().await;
        tables.last_team_id += 1;
        let team = Team::from_persistence(tables.last_team_id, name.to_string());
        tables.teams.push(team.clone());
        Ok(team)
    }

    async fn save_member(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(team_id) = member.team_id() {
            if tables.team(team_id).is_none() {
                return Err(RepositoryError::TeamNotFound(team_id));
            }
        }

        tables.last_member_id += 1;
        let saved = member.clone().into_member(tables.last_member_id);
        tables.members.push(saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.members.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.members.clone())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .iter()
            .filter(|m| m.username() == Some(username))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MemberQueryRepository for InMemoryMemberRepository {
    async fn fetch_rows(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<MemberTeamRow>, RepositoryError> {
        self.content_queries.fetch_add(1, Ordering::SeqCst);

        let tables = self.tables.read().await;
        let rows = tables
            .filtered_rows(condition, order)
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX));

        Ok(match limit {
            Some(limit) => rows
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => rows.collect(),
        })
    }

    async fn count_rows(&self, condition: &Condition) -> Result<u64, RepositoryError> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);

        let tables = self.tables.read().await;
        Ok(tables
            .joined_rows()
            .iter()
            .filter(|row| condition.matches(row))
            .count() as u64)
    }

    async fn fetch_dtos(
        &self,
        condition: &Condition,
        order: &[OrderSpec],
    ) -> Result<Vec<MemberDto>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .filtered_rows(condition, order)
            .iter()
            .map(MemberDto::from)
            .collect())
    }

    async fn age_statistics(&self) -> Result<AgeStatistics, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(AgeStatistics::from_ages(tables.members.iter().map(Member::age)))
    }

    async fn team_age_averages(&self) -> Result<Vec<TeamAgeAverage>, RepositoryError> {
        let tables = self.tables.read().await;

        let mut groups: BTreeMap<String, (i64, u64)> = BTreeMap::new();
        for row in tables.joined_rows() {
            if let Some(team_name) = row.team_name {
                let entry = groups.entry(team_name).or_default();
                entry.0 += i64::from(row.age);
                entry.1 += 1;
            }
        }

        Ok(groups
            .into_iter()
            .map(|(team_name, (sum, count))| TeamAgeAverage {
                team_name,
                average_age: sum as f64 / count as f64,
            })
            .collect())
    }

    async fn bulk_rename(&self, condition: &Condition, username: &str) -> Result<u64, RepositoryError> {
        ensure_member_columns(condition)?;

        let mut tables = self.tables.write().await;
        let ids = tables.matching_member_ids(condition);
        for member in tables.members.iter_mut() {
            if ids.contains(&member.id()) {
                *member = Member::from_persistence(
                    member.id(),
                    Some(username.to_string()),
                    member.age(),
                    member.team_id(),
                );
            }
        }
        Ok(ids.len() as u64)
    }

    async fn bulk_add_age(&self, delta: i32) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.update_ages(|age| age.checked_add(delta))
    }

    async fn bulk_multiply_age(&self, factor: i32) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.update_ages(|age| age.checked_mul(factor))
    }

    async fn bulk_delete(&self, condition: &Condition) -> Result<u64, RepositoryError> {
        ensure_member_columns(condition)?;

        let mut tables = self.tables.write().await;
        let ids = tables.matching_member_ids(condition);
        tables.members.retain(|member| !ids.contains(&member.id()));
        Ok(ids.len() as u64)
    }
}

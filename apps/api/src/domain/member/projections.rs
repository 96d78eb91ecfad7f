//! Read-only projections produced by member queries
//!
//! None of these types has a lifecycle of its own: they are built per query
//! and never written back.

use serde::Serialize;

/// Flattened `member LEFT JOIN team` row
///
/// Team columns are `None` for members that do not belong to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamRow {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Username and age only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl From<&MemberTeamRow> for MemberDto {
    fn from(row: &MemberTeamRow) -> Self {
        Self {
            username: row.username.clone(),
            age: row.age,
        }
    }
}

/// Aggregates over every member's age
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStatistics {
    pub count: u64,
    pub sum: i64,
    pub avg: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

impl AgeStatistics {
    /// Computes the statistics from a list of ages
    pub fn from_ages(ages: impl IntoIterator<Item = i32>) -> Self {
        let mut count = 0u64;
        let mut sum = 0i64;
        let mut max = None;
        let mut min = None;

        for age in ages {
            count += 1;
            sum += i64::from(age);
            max = Some(max.map_or(age, |m: i32| m.max(age)));
            min = Some(min.map_or(age, |m: i32| m.min(age)));
        }

        let avg = (count > 0).then(|| sum as f64 / count as f64);

        Self {
            count,
            sum,
            avg,
            max,
            min,
        }
    }
}

/// Average member age per team name
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TeamAgeAverage {
    pub team_name: String,
    pub average_age: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_over_four_members() {
        let stats = AgeStatistics::from_ages([10, 20, 30, 40]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.sum, 100);
        assert_eq!(stats.avg, Some(25.0));
        assert_eq!(stats.max, Some(40));
        assert_eq!(stats.min, Some(10));
    }

    #[test]
    fn statistics_without_members() {
        let stats = AgeStatistics::from_ages(Vec::new());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.sum, 0);
        assert!(stats.avg.is_none());
        assert!(stats.max.is_none());
        assert!(stats.min.is_none());
    }

    #[test]
    fn dto_from_row() {
        let row = MemberTeamRow {
            member_id: 1,
            username: Some("member1".to_string()),
            age: 10,
            team_id: Some(1),
            team_name: Some("teamA".to_string()),
        };
        let dto = MemberDto::from(&row);
        assert_eq!(dto.username.as_deref(), Some("member1"));
        assert_eq!(dto.age, 10);
    }
}

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

use super::condition::{member, team, Condition, ConditionBuilder};

/// Returns true when a text criterion carries no usable value
///
/// `None`, the empty string and whitespace-only strings are all blank.
///
/// # Example
/// ```
/// use member_search_api::domain::search::criteria::is_blank;
///
/// assert!(is_blank(None));
/// assert!(is_blank(Some("  ")));
/// assert!(!is_blank(Some("member1")));
/// ```
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn has_text(value: Option<&str>) -> bool {
    !is_blank(value)
}

/// Deserializes an optional query parameter, reading a blank value as absent
///
/// `?ageGoe=` binds to `None` instead of failing to parse.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Sparse member search criteria
///
/// Every field is optional and an absent field places no constraint on the
/// result. Blank text fields count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    username: Option<String>,
    team_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    age_goe: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    /// Composes the criteria from the per-field condition functions
    pub fn to_condition(&self) -> Condition {
        Condition::all_of([
            username_eq(self.username()),
            team_name_eq(self.team_name()),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ])
    }

    /// Composes the criteria by feeding a [`ConditionBuilder`] step by step
    pub fn to_condition_with_builder(&self) -> Condition {
        let mut builder = ConditionBuilder::new();
        builder
            .and_optional(username_eq(self.username()))
            .and_optional(team_name_eq(self.team_name()))
            .and_optional(age_goe(self.age_goe))
            .and_optional(age_loe(self.age_loe));
        builder.build()
    }
}

/// Drops blank text criteria
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| has_text(Some(*v)))
}

pub fn username_eq(username: Option<&str>) -> Option<Condition> {
    present(username).map(|u| member::USERNAME.eq(u))
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<Condition> {
    present(team_name).map(|t| team::NAME.eq(t))
}

pub fn age_goe(age: Option<i32>) -> Option<Condition> {
    age.map(|a| member::AGE.goe(a))
}

pub fn age_loe(age: Option<i32>) -> Option<Condition> {
    age.map(|a| member::AGE.loe(a))
}

/// Members whose age lies in `min..=max`
pub fn age_between(min: i32, max: i32) -> Condition {
    member::AGE.goe(min).and(member::AGE.loe(max))
}

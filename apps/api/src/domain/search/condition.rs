//! Filter expressions over the member/team projection
//!
//! A [`Condition`] is a plain expression tree. It is built through typed
//! column handles ([`member::AGE`], [`team::NAME`], ...) which expose the
//! comparison capabilities, and combined with [`Condition::and`] or a
//! [`ConditionBuilder`]. The infrastructure layer renders it to SQL; the
//! domain can evaluate it directly against a [`MemberTeamRow`].

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::domain::member::MemberTeamRow;

/// Columns of the `member LEFT JOIN team` projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl Field {
    /// Whether the column lives on the member table itself
    pub fn is_member_column(self) -> bool {
        matches!(self, Field::MemberId | Field::Username | Field::Age)
    }

    /// Reads the column out of a projected row, `None` meaning SQL NULL
    pub fn value_of(self, row: &MemberTeamRow) -> Option<Value> {
        match self {
            Field::MemberId => Some(Value::Int(row.member_id)),
            Field::Username => row.username.clone().map(Value::Text),
            Field::Age => Some(Value::Int(i64::from(row.age))),
            Field::TeamId => row.team_id.map(Value::Int),
            Field::TeamName => row.team_name.clone().map(Value::Text),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::MemberId => write!(f, "memberId"),
            Field::Username => write!(f, "username"),
            Field::Age => write!(f, "age"),
            Field::TeamId => write!(f, "teamId"),
            Field::TeamName => write!(f, "teamName"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "memberId" | "id" => Ok(Field::MemberId),
            "username" => Ok(Field::Username),
            "age" => Ok(Field::Age),
            "teamId" => Ok(Field::TeamId),
            "teamName" => Ok(Field::TeamName),
            other => Err(other.to_string()),
        }
    }
}

/// A literal compared against a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    /// Orders two values of the same kind; mixed kinds are incomparable
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Comparison operators supported by [`Condition::Compare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Goe,
    Loe,
    Lt,
    Gt,
}

impl Operator {
    pub fn sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Goe => ">=",
            Operator::Loe => "<=",
            Operator::Lt => "<",
            Operator::Gt => ">",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Goe => ordering != Ordering::Less,
            Operator::Loe => ordering != Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Gt => ordering == Ordering::Greater,
        }
    }
}

/// A filter over projected rows
///
/// `And(vec![])` is the empty conjunction and matches every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Compare {
        field: Field,
        op: Operator,
        value: Value,
    },
    And(Vec<Condition>),
}

impl Condition {
    /// The condition that places no constraint on rows
    pub fn match_all() -> Self {
        Condition::And(Vec::new())
    }

    pub fn is_match_all(&self) -> bool {
        match self {
            Condition::Compare { .. } => false,
            Condition::And(parts) => parts.iter().all(Condition::is_match_all),
        }
    }

    /// Conjoins two conditions, flattening nested conjunctions
    pub fn and(self, other: Condition) -> Condition {
        let mut parts = self.into_parts();
        parts.extend(other.into_parts());
        Condition::from_parts(parts)
    }

    /// Conjoins every present condition; absent ones are skipped
    ///
    /// # Example
    /// ```
    /// use member_search_api::domain::search::condition::{member, Condition};
    ///
    /// let condition = Condition::all_of([Some(member::AGE.goe(28)), None]);
    /// assert_eq!(condition, member::AGE.goe(28));
    ///
    /// assert!(Condition::all_of([None, None]).is_match_all());
    /// ```
    pub fn all_of<I>(conditions: I) -> Condition
    where
        I: IntoIterator<Item = Option<Condition>>,
    {
        conditions
            .into_iter()
            .flatten()
            .fold(Condition::match_all(), Condition::and)
    }

    /// Evaluates the condition against a row
    ///
    /// Comparisons against a NULL column never hold, as in SQL.
    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        match self {
            Condition::Compare { field, op, value } => field
                .value_of(row)
                .and_then(|actual| actual.compare(value))
                .is_some_and(|ordering| op.accepts(ordering)),
            Condition::And(parts) => parts.iter().all(|part| part.matches(row)),
        }
    }

    fn into_parts(self) -> Vec<Condition> {
        match self {
            Condition::And(parts) => parts,
            compare => vec![compare],
        }
    }

    fn from_parts(mut parts: Vec<Condition>) -> Condition {
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Condition::And(parts)
        }
    }
}

/// Incrementally collects conditions into a conjunction
#[derive(Debug, Default)]
pub struct ConditionBuilder {
    condition: Option<Condition>,
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(&mut self, condition: Condition) -> &mut Self {
        self.condition = Some(match self.condition.take() {
            Some(current) => current.and(condition),
            None => condition,
        });
        self
    }

    /// Adds the condition if present
    pub fn and_optional(&mut self, condition: Option<Condition>) -> &mut Self {
        if let Some(condition) = condition {
            self.and(condition);
        }
        self
    }

    pub fn build(self) -> Condition {
        self.condition.unwrap_or_else(Condition::match_all)
    }
}

/// Typed handle to a projected column
pub struct Column<T> {
    field: Field,
    _marker: PhantomData<fn() -> T>,
}

#[allow(clippy::should_implement_trait)]
impl<T: Into<Value>> Column<T> {
    pub const fn new(field: Field) -> Self {
        Self {
            field,
            _marker: PhantomData,
        }
    }

    pub fn eq(&self, value: impl Into<T>) -> Condition {
        self.compare(Operator::Eq, value)
    }

    pub fn goe(&self, value: impl Into<T>) -> Condition {
        self.compare(Operator::Goe, value)
    }

    pub fn loe(&self, value: impl Into<T>) -> Condition {
        self.compare(Operator::Loe, value)
    }

    pub fn lt(&self, value: impl Into<T>) -> Condition {
        self.compare(Operator::Lt, value)
    }

    pub fn gt(&self, value: impl Into<T>) -> Condition {
        self.compare(Operator::Gt, value)
    }

    fn compare(&self, op: Operator, value: impl Into<T>) -> Condition {
        let value: T = value.into();
        Condition::Compare {
            field: self.field,
            op,
            value: value.into(),
        }
    }
}

/// Member table columns
pub mod member {
    use super::{Column, Field};

    pub const ID: Column<i64> = Column::new(Field::MemberId);
    pub const USERNAME: Column<String> = Column::new(Field::Username);
    pub const AGE: Column<i32> = Column::new(Field::Age);
}

/// Team table columns
pub mod team {
    use super::{Column, Field};

    pub const ID: Column<i64> = Column::new(Field::TeamId);
    pub const NAME: Column<String> = Column::new(Field::TeamName);
}

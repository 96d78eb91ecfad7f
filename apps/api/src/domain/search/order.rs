use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use super::condition::Field;
use crate::domain::member::MemberTeamRow;

/// Errors raised while parsing a sort expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Unknown sort column: {0}")]
    UnknownColumn(String),

    #[error("Unknown sort direction: {0} (use asc or desc)")]
    UnknownDirection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Where NULL values are placed
///
/// `Default` follows PostgreSQL: last when ascending, first when descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    Default,
    First,
    Last,
}

/// One ordering key of a content query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub field: Field,
    pub direction: Direction,
    pub nulls: NullOrdering,
}

impl OrderSpec {
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Asc,
            nulls: NullOrdering::Default,
        }
    }

    pub fn desc(field: Field) -> Self {
        Self {
            field,
            direction: Direction::Desc,
            nulls: NullOrdering::Default,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }

    fn nulls_come_first(&self) -> bool {
        match self.nulls {
            NullOrdering::First => true,
            NullOrdering::Last => false,
            NullOrdering::Default => self.direction == Direction::Desc,
        }
    }

    /// Compares two rows on this key alone
    pub fn compare(&self, a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
        match (self.field.value_of(a), self.field.value_of(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) if self.nulls_come_first() => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) if self.nulls_come_first() => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ordering = x.compare(&y).unwrap_or(Ordering::Equal);
                match self.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            }
        }
    }

    /// Parses a `;`-separated list such as `age,desc;username`
    pub fn parse_list(value: &str) -> Result<Vec<Self>, OrderError> {
        value
            .split(';')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}

/// Compares two rows key by key, the first non-equal key deciding
pub fn compare_rows(order: &[OrderSpec], a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
    order
        .iter()
        .map(|spec| spec.compare(a, b))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

impl FromStr for OrderSpec {
    type Err = OrderError;

    /// Parses `column[,asc|desc]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let column = parts.next().unwrap_or_default();
        let field = column
            .parse::<Field>()
            .map_err(OrderError::UnknownColumn)?;

        match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => Ok(Self::asc(field)),
            Some(direction) if direction == "asc" => Ok(Self::asc(field)),
            Some(direction) if direction == "desc" => Ok(Self::desc(field)),
            Some(direction) => Err(OrderError::UnknownDirection(direction)),
        }
    }
}

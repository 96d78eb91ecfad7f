//! SQL rendering of domain conditions and orderings for PostgreSQL
//!
//! Every literal goes through `push_bind`; only column names and operators
//! from closed enums are written into the statement text.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::repositories::RepositoryError;
use crate::domain::search::condition::{Condition, Field, Value};
use crate::domain::search::order::{Direction, NullOrdering, OrderSpec};

const SELECT_MEMBER_TEAM: &str = "SELECT m.member_id, m.username, m.age, t.team_id, t.name AS team_name \
     FROM member m LEFT JOIN team t ON m.team_id = t.team_id";

const COUNT_MEMBER_TEAM: &str =
    "SELECT COUNT(m.member_id) FROM member m LEFT JOIN team t ON m.team_id = t.team_id";

const SELECT_MEMBER_DTO: &str =
    "SELECT m.username, m.age FROM member m LEFT JOIN team t ON m.team_id = t.team_id";

pub fn column(field: Field) -> &'static str {
    match field {
        Field::MemberId => "m.member_id",
        Field::Username => "m.username",
        Field::Age => "m.age",
        Field::TeamId => "t.team_id",
        Field::TeamName => "t.name",
    }
}

/// Appends ` WHERE ...` unless the condition matches everything
pub fn push_where(builder: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    if condition.is_match_all() {
        return;
    }
    builder.push(" WHERE ");
    push_condition(builder, condition);
}

pub fn push_condition(builder: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    match condition {
        Condition::Compare { field, op, value } => {
            builder.push(column(*field)).push(" ").push(op.sql()).push(" ");
            match value {
                Value::Int(v) => builder.push_bind(*v),
                Value::Text(v) => builder.push_bind(v.clone()),
            };
        }
        Condition::And(parts) => {
            let parts: Vec<&Condition> = parts.iter().filter(|p| !p.is_match_all()).collect();
            if parts.is_empty() {
                builder.push("TRUE");
                return;
            }
            builder.push("(");
            for (i, part) in parts.into_iter().enumerate() {
                if i > 0 {
                    builder.push(" AND ");
                }
                push_condition(builder, part);
            }
            builder.push(")");
        }
    }
}

/// Appends ` ORDER BY ...` when at least one key is given
pub fn push_order_by(builder: &mut QueryBuilder<'static, Postgres>, order: &[OrderSpec]) {
    for (i, spec) in order.iter().enumerate() {
        builder.push(if i == 0 { " ORDER BY " } else { ", " });
        builder.push(column(spec.field));
        builder.push(match spec.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
        match spec.nulls {
            NullOrdering::Default => {}
            NullOrdering::First => {
                builder.push(" NULLS FIRST");
            }
            NullOrdering::Last => {
                builder.push(" NULLS LAST");
            }
        }
    }
}

fn to_i64(value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value).map_err(|_| RepositoryError::OutOfRange(value))
}

/// Content query over the member/team projection
pub fn content_query(
    condition: &Condition,
    order: &[OrderSpec],
    offset: u64,
    limit: Option<u64>,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    let mut builder = QueryBuilder::new(SELECT_MEMBER_TEAM);
    push_where(&mut builder, condition);
    push_order_by(&mut builder, order);
    if let Some(limit) = limit {
        builder.push(" LIMIT ").push_bind(to_i64(limit)?);
    }
    if offset > 0 {
        builder.push(" OFFSET ").push_bind(to_i64(offset)?);
    }
    Ok(builder)
}

/// Count query over the same join, without window or ordering
pub fn count_query(condition: &Condition) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(COUNT_MEMBER_TEAM);
    push_where(&mut builder, condition);
    builder
}

pub fn dto_query(condition: &Condition, order: &[OrderSpec]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_MEMBER_DTO);
    push_where(&mut builder, condition);
    push_order_by(&mut builder, order);
    builder
}

/// `UPDATE member m SET username = $1 WHERE ...`
pub fn rename_statement(condition: &Condition, username: &str) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE member AS m SET username = ");
    builder.push_bind(username.to_string());
    push_where(&mut builder, condition);
    builder
}

/// `DELETE FROM member m WHERE ...`
pub fn delete_statement(condition: &Condition) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("DELETE FROM member AS m");
    push_where(&mut builder, condition);
    builder
}

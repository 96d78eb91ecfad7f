use thiserror::Error;

/// Business rule violations raised while constructing domain entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Team name cannot be blank")]
    BlankTeamName,

    #[error("Age cannot be negative: {0}")]
    NegativeAge(i32),
}

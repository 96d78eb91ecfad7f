use crate::domain::errors::DomainError;
use crate::domain::search::criteria::is_blank;

/// Team entity
///
/// # Invariants
/// - Name cannot be blank
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Team {
    #[sqlx(rename = "team_id")]
    id: i64,
    name: String,
}

impl Team {
    /// Validates a team name before it is handed to the datastore
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if is_blank(Some(name)) {
            return Err(DomainError::BlankTeamName);
        }
        Ok(())
    }

    /// Reconstructs a team from persisted state
    pub fn from_persistence(id: i64, name: String) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_accepts_text() {
        assert!(Team::validate_name("teamA").is_ok());
    }

    #[test]
    fn validate_name_rejects_empty() {
        assert_eq!(Team::validate_name(""), Err(DomainError::BlankTeamName));
    }

    #[test]
    fn validate_name_rejects_whitespace() {
        assert_eq!(Team::validate_name("  \t"), Err(DomainError::BlankTeamName));
    }
}

use crate::domain::errors::DomainError;

/// Member entity
///
/// A member has an optional username, a non-negative age and may belong to
/// at most one team. Identifiers are assigned by the datastore, so a member
/// is first described as a [`NewMember`] and only becomes a `Member` once
/// it has been persisted.
///
/// # Example
/// ```
/// use member_search_api::domain::member::member::NewMember;
///
/// let draft = NewMember::new(Some("member1".to_string()), 10, None).expect("valid member");
/// assert_eq!(draft.age(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Member {
    #[sqlx(rename = "member_id")]
    id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl Member {
    /// Reconstructs a member from persisted state
    ///
    /// No validation is performed; the datastore is trusted.
    pub fn from_persistence(id: i64, username: Option<String>, age: i32, team_id: Option<i64>) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }

    /// Moves the member to another team
    pub fn change_team(&mut self, team_id: i64) {
        self.team_id = Some(team_id);
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }
}

/// A validated member that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl NewMember {
    /// Creates a new member draft
    ///
    /// # Business Rules Enforced
    /// - Age must not be negative
    pub fn new(username: Option<String>, age: i32, team_id: Option<i64>) -> Result<Self, DomainError> {
        if age < 0 {
            return Err(DomainError::NegativeAge(age));
        }

        Ok(Self {
            username,
            age,
            team_id,
        })
    }

    /// Attaches the identifier handed out by the datastore
    pub fn into_member(self, id: i64) -> Member {
        Member::from_persistence(id, self.username, self.age, self.team_id)
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_accepts_zero_age() {
        let draft = NewMember::new(Some("member1".to_string()), 0, None).unwrap();
        assert_eq!(draft.age(), 0);
        assert_eq!(draft.username(), Some("member1"));
    }

    #[test]
    fn new_member_rejects_negative_age() {
        let result = NewMember::new(Some("member1".to_string()), -1, None);
        assert_eq!(result, Err(DomainError::NegativeAge(-1)));
    }

    #[test]
    fn new_member_allows_missing_username() {
        let draft = NewMember::new(None, 100, Some(1)).unwrap();
        assert!(draft.username().is_none());
        assert_eq!(draft.team_id(), Some(1));
    }

    #[test]
    fn into_member_keeps_fields() {
        let member = NewMember::new(Some("member2".to_string()), 20, Some(7))
            .unwrap()
            .into_member(42);

        assert_eq!(member.id(), 42);
        assert_eq!(member.username(), Some("member2"));
        assert_eq!(member.age(), 20);
        assert_eq!(member.team_id(), Some(7));
    }

    #[test]
    fn change_team_moves_member() {
        let mut member = Member::from_persistence(1, Some("member1".to_string()), 10, Some(1));
        member.change_team(2);
        assert_eq!(member.team_id(), Some(2));
    }
}

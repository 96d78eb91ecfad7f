use crate::domain::member::member::NewMember;
use crate::domain::repositories::{MemberRepository, RepositoryError};

/// Loads two teams and four members
///
/// teamA holds member1 (10) and member2 (20), teamB holds member3 (30) and
/// member4 (40).
pub async fn seed_sample_data<R>(repository: &R) -> Result<(), RepositoryError>
where
    R: MemberRepository + ?Sized,
{
    let team_a = repository.save_team("teamA").await?;
    let team_b = repository.save_team("teamB").await?;

    for (index, team) in [&team_a, &team_a, &team_b, &team_b].into_iter().enumerate() {
        let number = index as i32 + 1;
        let member = NewMember::new(Some(format!("member{}", number)), number * 10, Some(team.id()))?;
        repository.save_member(&member).await?;
    }

    tracing::info!("Sample members loaded");
    Ok(())
}

use super::*;

/// Tests finding a stored user and missing a never-seen one.
///
/// Expected: Ok(Some) then Ok(None)
#[tokio::test]
async fn finds_stored_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OAuthUserRepository::new(db);
    repo.upsert(param(7, "moderator", "token")).await?;

    let found = repo.find_by_discord_id(7).await?.unwrap();
    assert_eq!(found.name, "moderator");
    assert!(repo.find_by_discord_id(8).await?.is_none());

    Ok(())
}

use super::*;
use sea_orm::EntityTrait;

/// Tests that a second login refreshes the name and tokens in place.
///
/// Expected: Ok with one row holding the latest values
#[tokio::test]
async fn refreshes_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::OauthUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OAuthUserRepository::new(db);
    repo.upsert(param(7, "old-name", "token-1")).await?;
    let user = repo.upsert(param(7, "new-name", "token-2")).await?;

    assert_eq!(user.discord_id, 7);
    assert_eq!(user.name, "new-name");

    let rows = entity::prelude::OauthUser::find().all(db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].access_token, "token-2");

    Ok(())
}

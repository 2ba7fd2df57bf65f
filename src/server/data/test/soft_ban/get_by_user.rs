use super::*;

/// Tests that only bans for the requested guild and user are returned.
///
/// Expected: Ok with one ban
#[tokio::test]
async fn filters_by_guild_and_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SoftBan)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ban = SoftBanFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .build()
        .await?;
    SoftBanFactory::new(db)
        .guild_id("1")
        .user_id("5")
        .build()
        .await?;

    let bans = SoftBanRepository::new(db).get_by_user(1, 2).await?;

    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].id, ban.id);

    Ok(())
}

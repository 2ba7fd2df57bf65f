use super::*;

/// Tests deleting a lifted ban.
///
/// Expected: Ok(true) then Ok(false) on the second delete
#[tokio::test]
async fn deletes_once() -> Result<(), AppError> {
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

    let repo = SoftBanRepository::new(db);

    assert!(repo.delete(ban.id).await?);
    assert!(!repo.delete(ban.id).await?);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}

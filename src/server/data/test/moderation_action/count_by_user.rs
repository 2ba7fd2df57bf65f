use super::*;

/// Tests counting actions per kind for a user.
///
/// Expected: Ok with per-kind counts and zero for kinds never taken
#[tokio::test]
async fn counts_each_kind_separately() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        ModerationActionFactory::new(db)
            .guild_id("1")
            .user_id("2")
            .build()
            .await?;
    }
    ModerationActionFactory::new(db)
        .kind("kick")
        .guild_id("1")
        .user_id("2")
        .build()
        .await?;

    let repo = ModerationActionRepository::new(db);

    assert_eq!(repo.count_by_user(1, 2, ModerationKind::Warn).await?, 3);
    assert_eq!(repo.count_by_user(1, 2, ModerationKind::Kick).await?, 1);
    assert_eq!(repo.count_by_user(1, 2, ModerationKind::Ban).await?, 0);

    Ok(())
}

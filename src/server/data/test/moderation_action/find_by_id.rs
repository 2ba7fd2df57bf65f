use super::*;

/// Tests finding an existing action by id.
///
/// Expected: Ok(Some) with the matching record
#[tokio::test]
async fn finds_existing_action() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ban = ModerationActionFactory::new(db)
        .kind("ban")
        .guild_id("10")
        .user_id("20")
        .build()
        .await?;

    let found = ModerationActionRepository::new(db)
        .find_by_id(ban.id)
        .await?
        .unwrap();

    assert_eq!(found.id, ban.id);
    assert_eq!(found.kind, ModerationKind::Ban);
    assert_eq!(found.guild_id, 10);

    Ok(())
}

/// Tests looking up an id that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let found = ModerationActionRepository::new(db).find_by_id(999).await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests that a row with a non-numeric id is reported instead of half converted.
///
/// Expected: Err
#[tokio::test]
async fn errors_on_malformed_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let broken = ModerationActionFactory::new(db)
        .guild_id("not-a-guild")
        .build()
        .await?;

    let result = ModerationActionRepository::new(db).find_by_id(broken.id).await;

    assert!(result.is_err());

    Ok(())
}

use super::*;
use chrono::{Duration, Utc};

/// Tests that only the requested kind, guild and user are returned, newest first.
///
/// Expected: Ok with the two matching warns, newest first
#[tokio::test]
async fn filters_by_guild_user_and_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = ModerationActionFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = ModerationActionFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .created_at(now)
        .build()
        .await?;
    // Different kind, guild and user
    ModerationActionFactory::new(db)
        .kind("kick")
        .guild_id("1")
        .user_id("2")
        .build()
        .await?;
    ModerationActionFactory::new(db)
        .guild_id("9")
        .user_id("2")
        .build()
        .await?;
    ModerationActionFactory::new(db)
        .guild_id("1")
        .user_id("3")
        .build()
        .await?;

    let warns = ModerationActionRepository::new(db)
        .get_by_user(1, 2, ModerationKind::Warn)
        .await?;

    assert_eq!(
        warns.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    Ok(())
}

/// Tests that malformed rows are skipped rather than failing the listing.
///
/// Expected: Ok with only the valid row
#[tokio::test]
async fn skips_malformed_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let valid = ModerationActionFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .build()
        .await?;
    ModerationActionFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .actor_id("system")
        .build()
        .await?;

    let warns = ModerationActionRepository::new(db)
        .get_by_user(1, 2, ModerationKind::Warn)
        .await?;

    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].id, valid.id);

    Ok(())
}

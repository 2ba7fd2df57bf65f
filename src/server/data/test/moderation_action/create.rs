use super::*;
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;

/// Tests recording a warn.
///
/// Verifies that the record is stored with string ids and the kind name, and that the
/// returned record carries the assigned id.
///
/// Expected: Ok with the stored warn
#[tokio::test]
async fn creates_warn() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ModerationActionRepository::new(db);
    let record = repo
        .create(CreateModerationParam {
            kind: ModerationKind::Warn,
            guild_id: 100,
            user_id: 200,
            actor_id: 300,
            reason: "Spamming".to_string(),
            timeout_until: None,
        })
        .await?;

    assert!(record.id > 0);
    assert_eq!(record.kind, ModerationKind::Warn);
    assert_eq!(record.user_id, 200);

    let stored = entity::prelude::ModerationAction::find_by_id(record.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.kind, "warn");
    assert_eq!(stored.guild_id, "100");
    assert_eq!(stored.actor_id, "300");

    Ok(())
}

/// Tests recording a timeout with its end time.
///
/// Expected: Ok with `timeout_until` preserved
#[tokio::test]
async fn creates_timeout_with_end() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ModerationAction)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let until = Utc::now() + Duration::minutes(30);
    let record = ModerationActionRepository::new(db)
        .create(CreateModerationParam {
            kind: ModerationKind::TimeOut,
            guild_id: 1,
            user_id: 2,
            actor_id: 3,
            reason: "Cool off".to_string(),
            timeout_until: Some(until),
        })
        .await?;

    assert_eq!(record.kind, ModerationKind::TimeOut);
    assert_eq!(
        record.timeout_until.map(|t| t.timestamp()),
        Some(until.timestamp())
    );

    Ok(())
}

use super::*;

/// Tests recording a soft ban.
///
/// Expected: Ok with the stored ban and its duration
#[tokio::test]
async fn creates_soft_ban() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SoftBan)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ban = SoftBanRepository::new(db)
        .create(CreateSoftBanParam {
            guild_id: 1,
            user_id: 2,
            actor_id: 3,
            reason: "Raid".to_string(),
            days: 7,
        })
        .await?;

    assert!(ban.id > 0);
    assert_eq!(ban.days, 7);
    assert_eq!(ban.reason, "Raid");
    assert!(!ban.is_expired(ban.created_at));

    Ok(())
}

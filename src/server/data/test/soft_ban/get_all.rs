use super::*;
use chrono::{Duration, Utc};

/// Tests listing every outstanding ban oldest first.
///
/// Expected: Ok with bans ordered by issue time
#[tokio::test]
async fn returns_all_bans_oldest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SoftBan)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let recent = SoftBanFactory::new(db)
        .guild_id("1")
        .user_id("2")
        .build()
        .await?;
    let old = SoftBanFactory::new(db)
        .guild_id("3")
        .user_id("4")
        .created_at(Utc::now() - Duration::days(10))
        .build()
        .await?;

    let bans = SoftBanRepository::new(db).get_all().await?;

    assert_eq!(
        bans.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![old.id, recent.id]
    );
    assert!(bans[0].is_expired(Utc::now()));

    Ok(())
}

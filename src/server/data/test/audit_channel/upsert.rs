use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests that upsert replaces the channel without adding a row.
///
/// Expected: Ok with the new channel and a single row
#[tokio::test]
async fn replaces_existing_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AuditChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditChannelRepository::new(db);
    repo.upsert(1, 10).await?;
    repo.upsert(1, 20).await?;

    assert_eq!(repo.get(1).await?, Some(20));
    assert_eq!(entity::prelude::AuditChannel::find().count(db).await?, 1);

    Ok(())
}

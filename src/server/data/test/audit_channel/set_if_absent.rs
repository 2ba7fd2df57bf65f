use super::*;

/// Tests that the first channel set for a guild wins.
///
/// Expected: Ok(true) for the first set, Ok(false) for the second with no change
#[tokio::test]
async fn keeps_existing_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AuditChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditChannelRepository::new(db);

    assert!(repo.set_if_absent(1, 10).await?);
    assert!(!repo.set_if_absent(1, 20).await?);
    assert_eq!(repo.get(1).await?, Some(10));

    Ok(())
}

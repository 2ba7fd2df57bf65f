use super::*;

/// Tests reading a configured audit channel.
///
/// Expected: Ok(Some) for the configured guild, Ok(None) for others
#[tokio::test]
async fn gets_configured_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AuditChannel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    create_audit_channel(db, "1", "10").await?;

    let repo = AuditChannelRepository::new(db);

    assert_eq!(repo.get(1).await?, Some(10));
    assert_eq!(repo.get(2).await?, None);

    Ok(())
}

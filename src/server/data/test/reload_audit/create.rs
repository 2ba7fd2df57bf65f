use super::*;

/// Tests recording a reload.
///
/// Expected: Ok with the owner id and reason stored
#[tokio::test]
async fn records_reload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReloadAudit)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let record = ReloadAuditRepository::new(db)
        .create(42, "Deploying new build")
        .await?;

    assert!(record.id > 0);
    assert_eq!(record.user_id, 42);
    assert_eq!(record.reason, "Deploying new build");

    Ok(())
}

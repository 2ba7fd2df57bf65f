use super::*;

/// Tests listing reloads newest first.
///
/// Expected: Ok with the later reload first
#[tokio::test]
async fn returns_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ReloadAudit)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = create_reload_audit(db, "42", "First").await?;
    let second = create_reload_audit(db, "42", "Second").await?;

    let reloads = ReloadAuditRepository::new(db).get_all().await?;

    assert_eq!(reloads.len(), 2);
    // Same timestamp resolution falls back to id order
    assert_eq!(reloads[0].id, second.id);
    assert_eq!(reloads[1].id, first.id);

    Ok(())
}

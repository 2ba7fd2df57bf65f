use super::*;

/// Tests that ids are scoped to the academic year.
///
/// Expected: Ok with only the ids stored under 2026
#[tokio::test]
async fn returns_ids_for_year_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ApprenticeshipFactory::new(db).id("VAC1").build().await?;
    ApprenticeshipFactory::new(db).id("VAC2").build().await?;
    ApprenticeshipFactory::new(db)
        .id("VAC3")
        .academic_year(2025)
        .build()
        .await?;

    let ids = ApprenticeshipRepository::new(db).existing_ids(2026).await?;

    assert_eq!(ids.len(), 2);
    assert!(ids.contains("VAC1"));
    assert!(ids.contains("VAC2"));
    assert!(!ids.contains("VAC3"));

    Ok(())
}

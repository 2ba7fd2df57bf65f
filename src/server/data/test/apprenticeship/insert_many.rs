use super::*;
use sea_orm::EntityTrait;

/// Tests inserting a batch of listings.
///
/// Expected: Ok(2) with the source and academic year filled in
#[tokio::test]
async fn inserts_batch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let inserted = ApprenticeshipRepository::new(db)
        .insert_many(2026, &[listing("VAC1", None), listing("VAC2", None)])
        .await?;

    assert_eq!(inserted, 2);

    let stored = entity::prelude::Apprenticeship::find_by_id("VAC1".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.academic_year, 2026);
    assert_eq!(stored.source, "Find an Apprenticeship");

    Ok(())
}

/// Tests that each listing keeps its own source.
///
/// Expected: Ok(1) with the Higher In source stored
#[tokio::test]
async fn stores_listing_source() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut higherin = listing("48213", None);
    higherin.category = "software-engineering".to_string();
    higherin.source = ApprenticeshipSource::HigherIn;

    ApprenticeshipRepository::new(db)
        .insert_many(2026, &[higherin])
        .await?;

    let stored = entity::prelude::Apprenticeship::find_by_id("48213".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.source, "Higher In");
    assert_eq!(
        Apprenticeship::from_entity(stored).source,
        ApprenticeshipSource::HigherIn
    );

    Ok(())
}

/// Tests that an empty batch is a no-op.
///
/// Expected: Ok(0)
#[tokio::test]
async fn empty_batch_inserts_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let inserted = ApprenticeshipRepository::new(db)
        .insert_many(2026, &[])
        .await?;

    assert_eq!(inserted, 0);

    Ok(())
}

/// Tests that inserting an id already stored fails.
///
/// Expected: Err from the primary key constraint
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ApprenticeshipFactory::new(db).id("VAC1").build().await?;

    let result = ApprenticeshipRepository::new(db)
        .insert_many(2026, &[listing("VAC1", None)])
        .await;

    assert!(result.is_err());

    Ok(())
}

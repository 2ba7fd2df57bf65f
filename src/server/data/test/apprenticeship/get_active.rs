use super::*;

/// Tests that closed listings are excluded and undated ones kept last.
///
/// Expected: Ok with the listing closing today, then the later one, then the undated one
#[tokio::test]
async fn returns_open_listings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Apprenticeship)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

    ApprenticeshipFactory::new(db)
        .id("CLOSED")
        .closes_on(NaiveDate::from_ymd_opt(2026, 1, 9))
        .build()
        .await?;
    ApprenticeshipFactory::new(db)
        .id("LATER")
        .closes_on(NaiveDate::from_ymd_opt(2026, 2, 1))
        .build()
        .await?;
    ApprenticeshipFactory::new(db)
        .id("TODAY")
        .closes_on(Some(today))
        .build()
        .await?;
    ApprenticeshipFactory::new(db).id("UNDATED").build().await?;

    let active = ApprenticeshipRepository::new(db).get_active(today).await?;

    assert_eq!(
        active.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
        vec!["TODAY", "LATER", "UNDATED"]
    );

    Ok(())
}

use super::*;

/// Tests finding an existing ledger entry.
///
/// Expected: Ok(Some(LedgerEntry)) with the stored counters
#[tokio::test]
async fn finds_existing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_stats_with(db, "123456789", 250, 2).await?;

    let repo = LedgerRepository::new(db);
    let entry = repo.find_by_user_id(123456789).await?;

    assert_eq!(
        entry,
        Some(LedgerEntry {
            user_id: 123456789,
            activity_count: 250,
            point_balance: 2,
        })
    );

    Ok(())
}

/// Tests querying a user who was never credited.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LedgerRepository::new(db);

    assert!(repo.find_by_user_id(999999999).await?.is_none());

    Ok(())
}

/// Tests that a corrupted (negative) counter is reported instead of clamped.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_negative_counter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_stats_with(db, "42", -1, 0).await?;

    let repo = LedgerRepository::new(db);
    let result = repo.find_by_user_id(42).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}

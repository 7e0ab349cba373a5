use super::*;

/// Tests deleting an existing entry.
///
/// Expected: Ok(true) and the entry is gone
#[tokio::test]
async fn deletes_existing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_stats_with(db, "123", 500, 5).await?;

    let repo = LedgerRepository::new(db);

    assert!(repo.delete(123).await?);
    assert!(repo.find_by_user_id(123).await?.is_none());

    Ok(())
}

/// Tests deleting a user without a row.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_missing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LedgerRepository::new(db);

    assert!(!repo.delete(404).await?);

    Ok(())
}

use super::*;

/// Tests listing every stored entry.
///
/// Expected: Ok with one entry per row, order not guaranteed
#[tokio::test]
async fn returns_every_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_stats_with(db, "1", 100, 1).await?;
    factory::create_user_stats_with(db, "2", 1000, 15).await?;
    factory::create_user_stats_with(db, "3", 1000, 0).await?;

    let repo = LedgerRepository::new(db);
    let mut entries = repo.get_all().await?;
    entries.sort_by_key(|entry| entry.user_id);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].point_balance, 1);
    assert_eq!(entries[1].activity_count, 1000);
    assert_eq!(entries[2].point_balance, 0);

    Ok(())
}

/// Tests listing an empty table.
///
/// Expected: Ok(empty vector)
#[tokio::test]
async fn returns_empty_for_empty_table() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LedgerRepository::new(db);

    assert!(repo.get_all().await?.is_empty());

    Ok(())
}

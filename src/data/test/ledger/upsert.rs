use super::*;

/// Tests inserting a new entry.
///
/// Expected: the entry can be read back unchanged
#[tokio::test]
async fn inserts_new_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LedgerRepository::new(db);
    let entry = LedgerEntry::empty(111).with_activity(1000);

    repo.upsert(entry).await?;

    assert_eq!(repo.find_by_user_id(111).await?, Some(entry));

    Ok(())
}

/// Tests overwriting both counters of an existing entry.
///
/// Expected: stored values replaced, no duplicate row
#[tokio::test]
async fn overwrites_existing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user_stats_with(db, "222", 250, 2).await?;

    let repo = LedgerRepository::new(db);
    let settled = LedgerEntry::empty(222).with_activity(250).settled();
    repo.upsert(settled).await?;

    assert_eq!(repo.find_by_user_id(222).await?, Some(settled));
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests that repeating an upsert with identical arguments is idempotent.
///
/// Expected: same observable state as a single call
#[tokio::test]
async fn repeated_upsert_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ledger_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LedgerRepository::new(db);
    let entry = LedgerEntry::empty(333).with_activity(420);

    repo.upsert(entry).await?;
    let once = repo.get_all().await?;
    repo.upsert(entry).await?;
    let twice = repo.get_all().await?;

    assert_eq!(once, twice);

    Ok(())
}

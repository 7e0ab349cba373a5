use crate::{data::ledger::LedgerRepository, error::AppError, model::ledger::LedgerEntry};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_by_user_id;
mod get_all;
mod upsert;

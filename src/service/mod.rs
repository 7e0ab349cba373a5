//! Business logic layer.
//!
//! - **Balance Store** (`balance`) - write-through ledger cache over the repository
//! - **Activity Accumulator** (`activity`) - turns messages into points
//! - **Concurrency Guard** (`guard`) - one claim per user and the autopay switch
//! - **Claim Orchestrator** (`claim`) - the autopay state machine
//! - **Spam Filter** (`spam`) - per-user message rate shaping ahead of the accumulator

pub mod activity;
pub mod balance;
pub mod claim;
pub mod guard;
pub mod spam;

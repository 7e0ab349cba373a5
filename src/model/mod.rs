//! Domain models shared by the data, service and bot layers.
//!
//! - `ledger` - per-user activity and point balance plus the points formula
//! - `claim` - claim request, state machine states and terminal outcomes
//! - `market` - messages and action handles observed from the market bot

pub mod claim;
pub mod ledger;
pub mod market;

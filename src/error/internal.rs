use std::num::{ParseIntError, TryFromIntError};
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A ledger counter does not fit the range of the target integer type.
    ///
    /// Raised when a stored counter is negative or a domain counter exceeds `i64::MAX`
    /// on its way into the database.
    #[error("Ledger counter '{field}' for user {user_id} is out of range: {source}")]
    CounterOutOfRange {
        /// Discord ID of the ledger owner
        user_id: u64,
        /// Which counter overflowed
        field: &'static str,
        /// The underlying conversion error
        #[source]
        source: TryFromIntError,
    },
}

use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Converts a domain counter into its database column representation.
pub fn counter_to_i64(user_id: u64, field: &'static str, value: u64) -> Result<i64, AppError> {
    let result = i64::try_from(value).map_err(|e| InternalError::CounterOutOfRange {
        user_id,
        field,
        source: e,
    })?;

    Ok(result)
}

/// Converts a stored database counter into its domain representation.
///
/// Stored counters are never negative; a negative value means the row was edited by hand
/// or written by a bug and is reported instead of silently clamped.
pub fn counter_from_i64(user_id: u64, field: &'static str, value: i64) -> Result<u64, AppError> {
    let result = u64::try_from(value).map_err(|e| InternalError::CounterOutOfRange {
        user_id,
        field,
        source: e,
    })?;

    Ok(result)
}

use crate::server::error::internal::InternalError;

/// Parses a Discord id stored as a String
///
/// Discord ids are persisted as strings in the database and the session store.
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed id
/// - `Err(InternalError::ParseStringId)` - The value was not a valid id
pub fn parse_u64_from_string(value: String) -> Result<u64, InternalError> {
    value
        .parse::<u64>()
        .map_err(|source| InternalError::ParseStringId { value, source })
}

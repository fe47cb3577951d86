//! Errors surfaced by table operations.

use thiserror::Error;

/// Failure of a single table call. Absent keys are not errors; they come back
/// as an absent [`Probes`](crate::Probes) result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// `put` was handed an empty key or value. The table is left untouched.
    #[error("invalid argument: {which} must be a non-empty string")]
    InvalidArgument { which: Argument },
}

/// Which argument of a call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Key,
    Value,
    KeyAndValue,
}

impl core::fmt::Display for Argument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Argument::Key => "key",
            Argument::Value => "value",
            Argument::KeyAndValue => "key and value",
        })
    }
}

/// Reject an empty key and/or value before any mutation happens.
pub(crate) fn check_entry(key: &str, value: &str) -> Result<(), TableError> {
    let which = match (key.is_empty(), value.is_empty()) {
        (false, false) => return Ok(()),
        (true, false) => Argument::Key,
        (false, true) => Argument::Value,
        (true, true) => Argument::KeyAndValue,
    };
    Err(TableError::InvalidArgument { which })
}

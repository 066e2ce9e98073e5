//! Error types for keysift.
//!
//! Predicate evaluation is total for well-formed input, so every variant
//! here describes caller misuse rather than a recoverable runtime state.

use alloc::string::String;
use thiserror::Error;

/// Result type alias for keysift operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for keysift operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was outside the domain of the operation.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
    /// Key and value sequences of one batch have different lengths.
    #[error("Misaligned batch: {keys} keys but {values} values")]
    MisalignedBatch { keys: usize, values: usize },
    /// Keys handed to a bulk loader were not in ascending order.
    #[error("Unsorted input: key at position {position} is smaller than its predecessor")]
    UnsortedInput { position: usize },
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a misaligned batch error.
    pub fn misaligned_batch(keys: usize, values: usize) -> Self {
        Error::MisalignedBatch { keys, values }
    }

    /// Creates an unsorted input error.
    pub fn unsorted_input(position: usize) -> Self {
        Error::UnsortedInput { position }
    }

    /// Returns true if this error reports an invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::invalid_argument("absent key").to_string(),
            "Invalid argument: absent key"
        );
        assert_eq!(
            Error::misaligned_batch(3, 2).to_string(),
            "Misaligned batch: 3 keys but 2 values"
        );
        assert_eq!(
            Error::unsorted_input(4).to_string(),
            "Unsorted input: key at position 4 is smaller than its predecessor"
        );
    }

    #[test]
    fn test_error_kind() {
        assert!(Error::invalid_argument("x").is_invalid_argument());
        assert!(!Error::misaligned_batch(1, 0).is_invalid_argument());
    }
}

use error_location::ErrorLocation;
use thiserror::Error;

/// Timer engine errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A persisted timer record is missing fields or carries bad values.
    #[error("Malformed timer record: {reason} {location}")]
    MalformedRecord {
        /// Description of what was wrong with the record.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The settings store could not be read or written.
    #[error("Settings store error: {reason} {location}")]
    Store {
        /// Description of the store failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A caller handed an out-of-range value to the engine.
    #[error("Invalid argument: {reason} {location}")]
    InvalidArgument {
        /// Description of the rejected value.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

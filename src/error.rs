//! Error types for trs-trace
//!
//! Failures are local to trace construction. Coding analysis never fails:
//! non-finite samples are classified, not rejected.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// trs-trace error types
#[derive(Error, Debug)]
pub enum Error {
    /// A named parameter could not be serialized into trace data
    #[error("Failed to serialize trace parameter '{name}': {reason}\nNo trace was created")]
    Serialization {
        /// Parameter name
        name: String,
        /// Why serialization failed
        reason: String,
    },

    /// Builder or setter received an unusable value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A trace holding NaN or infinite samples cannot join a uniform coding
    #[error("Trace {index} contains illegal sample values (NaN or infinity)")]
    IllegalSamples {
        /// Position of the offending trace
        index: usize,
    },
}

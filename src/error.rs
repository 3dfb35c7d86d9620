//! Error types for the Legislative Impact Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while analysing legislation.
//! Only roster, amount, calculation and configuration errors ever reach a
//! caller; the remaining variants are absorbed by the component that
//! produced them and surface as data in its output.

use thiserror::Error;

/// The main error type for the Legislative Impact Engine.
///
/// # Example
///
/// ```
/// use impact_engine::error::EngineError;
///
/// let error = EngineError::MalformedAmount {
///     raw: "$,".to_string(),
/// };
/// assert_eq!(error.to_string(), "Malformed currency amount: '$,'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record in the roster was invalid.
    #[error("Invalid roster entry '{employee_id}': {message}")]
    InvalidRoster {
        /// The ID of the offending employee record.
        employee_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A matched currency string did not reduce to a number.
    #[error("Malformed currency amount: '{raw}'")]
    MalformedAmount {
        /// The raw currency text as it was matched.
        raw: String,
    },

    /// A calculation left the representable decimal range.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Legislative text could not be turned into rules.
    #[error("Extraction failed: {message}")]
    ExtractionFailure {
        /// A description of the failure.
        message: String,
    },

    /// A regulatory feed could not be fetched.
    #[error("Failed to fetch feed '{url}': {message}")]
    FetchFailure {
        /// The feed URL.
        url: String,
        /// A description of the transport or status failure.
        message: String,
    },

    /// The external attestation service could not anchor a digest.
    #[error("Attestation failed: {message}")]
    AttestationFailure {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that invalidate the caller's request.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidRoster { .. } | EngineError::MalformedAmount { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for vm-query.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by most operations
//!   - [`ParseAddressError`] — Invalid bech32 or hex address
//!   - [`ParseFunctionError`] — Invalid contract function name
//!   - [`ParseArgumentError`] — Invalid hex argument
//!   - [`ParseBalanceError`] — Invalid balance amount
//!
//! Decoding a response never produces an error. A contract call that failed
//! on chain is still valid data; it only becomes an [`Error::Contract`] when
//! the caller asks for it with
//! [`QueryResponse::assert_success`](crate::QueryResponse::assert_success).
//!
//! ```rust
//! use vm_query::{Error, QueryResponse};
//!
//! let payload = serde_json::json!({
//!     "returnCode": "user error",
//!     "returnMessage": "unknown function",
//! });
//! let response = QueryResponse::from_http_response(&payload);
//!
//! match response.assert_success() {
//!     Err(Error::Contract(message)) => assert_eq!(message, "user error: unknown function"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Error parsing an address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseAddressError {
    #[error("Invalid bech32 encoding: {0}")]
    InvalidBech32(String),

    #[error("Wrong address prefix: expected '{expected}', got '{actual}'")]
    WrongHrp { expected: String, actual: String },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Error parsing a contract function name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseFunctionError {
    #[error("Function name is empty")]
    Empty,

    #[error("Function name '{0}' contains invalid character {1:?}")]
    InvalidChar(String, char),
}

/// Error parsing a contract argument.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseArgumentError {
    #[error("Invalid hex argument: '{0}'")]
    InvalidHex(String),

    #[error("Hex argument '{0}' has odd length")]
    OddLength(String),
}

/// Error parsing a balance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseBalanceError {
    #[error("Invalid balance: '{0}'")]
    InvalidNumber(String),

    #[error("Balance overflow: value too large")]
    Overflow,
}

/// Main error type for vm-query operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Construction ───
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─── Contract ───
    #[error("{0}")]
    Contract(String),

    // ─── Parsing ───
    #[error(transparent)]
    ParseAddress(#[from] ParseAddressError),

    #[error(transparent)]
    ParseFunction(#[from] ParseFunctionError),

    #[error(transparent)]
    ParseArgument(#[from] ParseArgumentError),

    #[error(transparent)]
    ParseBalance(#[from] ParseBalanceError),

    // ─── Configuration ───
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ─── Transport ───
    #[error("Transport error: {0}")]
    Transport(String),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(message.into())
    }

    /// Returns true if this error came from a failed contract assertion.
    pub fn is_contract_error(&self) -> bool {
        matches!(self, Error::Contract(_))
    }

    /// Returns true if this error indicates a missing or invalid query field.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_display_is_bare_message() {
        let err = Error::Contract("out of gas: insufficient funds".to_string());
        assert_eq!(err.to_string(), "out of gas: insufficient funds");
        assert!(err.is_contract_error());
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::invalid_argument("address is not set");
        assert_eq!(err.to_string(), "Invalid argument: address is not set");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_parse_address_error_display() {
        assert_eq!(
            ParseAddressError::WrongHrp {
                expected: "erd".to_string(),
                actual: "bc".to_string(),
            }
            .to_string(),
            "Wrong address prefix: expected 'erd', got 'bc'"
        );
        assert_eq!(
            ParseAddressError::InvalidLength(20).to_string(),
            "Invalid address length: expected 32 bytes, got 20"
        );
    }

    #[test]
    fn test_parse_function_error_display() {
        assert_eq!(ParseFunctionError::Empty.to_string(), "Function name is empty");
        assert_eq!(
            ParseFunctionError::InvalidChar("get sum".to_string(), ' ').to_string(),
            "Function name 'get sum' contains invalid character ' '"
        );
    }

    #[test]
    fn test_error_from_parse_errors() {
        let err: Error = ParseAddressError::InvalidLength(3).into();
        assert!(matches!(err, Error::ParseAddress(_)));

        let err: Error = ParseFunctionError::Empty.into();
        assert!(matches!(err, Error::ParseFunction(_)));

        let err: Error = ParseArgumentError::OddLength("abc".to_string()).into();
        assert!(matches!(err, Error::ParseArgument(_)));

        let err: Error = ParseBalanceError::Overflow.into();
        assert!(matches!(err, Error::ParseBalance(_)));
    }

    #[test]
    fn test_transport_error_display() {
        assert_eq!(
            Error::transport("connection refused").to_string(),
            "Transport error: connection refused"
        );
    }
}

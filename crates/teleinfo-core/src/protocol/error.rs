use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of decode failures.
///
/// The string form is the `error_type` label handed to outcome reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidField,
    InvalidChecksumLength,
    #[serde(rename = "checksum_error")]
    ChecksumMismatch,
    UnknownField,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidField => "invalid_field",
            ErrorKind::InvalidChecksumLength => "invalid_checksum_length",
            ErrorKind::ChecksumMismatch => "checksum_error",
            ErrorKind::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by frame decoding.
///
/// Byte payloads are kept for diagnostics only and rendered lossily.
///
/// # Examples
/// ```
/// use teleinfo_core::{DecodeError, ErrorKind};
///
/// let err = DecodeError::InvalidChecksumLength { actual: 2, expected: 1 };
/// assert_eq!(err.kind(), ErrorKind::InvalidChecksumLength);
/// assert!(err.to_string().contains("invalid checksum length"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid number of elements for data (data: '{}', len: {parts})", lossy(.data))]
    InvalidField { data: Vec<u8>, parts: usize },
    #[error("invalid checksum length (actual: {actual}, expected: {expected})")]
    InvalidChecksumLength { actual: usize, expected: usize },
    #[error(
        "invalid checksum (field: '{}', value: '{}', read: '{}', expected: '{}')",
        lossy(.name),
        lossy(.value),
        printable(.read),
        printable(.expected)
    )]
    ChecksumMismatch {
        name: Vec<u8>,
        value: Vec<u8>,
        read: u8,
        expected: u8,
    },
    #[error("unknown field (field: '{name}', value: '{value}')")]
    UnknownField { name: String, value: String },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidField { .. } => ErrorKind::InvalidField,
            DecodeError::InvalidChecksumLength { .. } => ErrorKind::InvalidChecksumLength,
            DecodeError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            DecodeError::UnknownField { .. } => ErrorKind::UnknownField,
        }
    }
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn printable(byte: &u8) -> char {
    char::from(*byte)
}

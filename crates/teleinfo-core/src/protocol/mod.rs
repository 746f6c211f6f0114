//! Teleinfo frame decoding.
//!
//! The protocol follows the same layered structure for both modes:
//! - `layout`: separators and checksum constants (source of truth)
//! - `reader`: frame and field splitting
//! - `checksum`: per-field checksum computation
//! - `historic` / `standard`: mode-specific decoders
//! - `fields`: known historic fields and their numeric projection
//! - `error`: explicit, classified errors
//!
//! Decoding is pure apart from the calls made on the injected
//! [`OutcomeReporter`]: exactly one of `frame_decoded` or `decode_error` per
//! attempt, and projections only for frames that decoded completely.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::Frame;
use crate::outcome::{NoopReporter, OutcomeReporter};

pub mod checksum;
pub mod error;
pub mod fields;
pub mod historic;
pub mod layout;
pub mod reader;
pub mod standard;

pub use error::{DecodeError, ErrorKind};

/// Teleinfo wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Historic,
    Standard,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Historic => "historic",
            Mode::Standard => "standard",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Teleinfo mode '{0}' (expected 'historic' or 'standard')")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "historic" => Ok(Mode::Historic),
            "standard" => Ok(Mode::Standard),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Decodes one delimited frame without reporting outcomes.
///
/// # Examples
/// ```
/// use teleinfo_core::{ErrorKind, Mode, decode};
///
/// let err = decode(b"FOO 1 U", Mode::Historic).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnknownField);
/// ```
pub fn decode(payload: &[u8], mode: Mode) -> Result<Frame, DecodeError> {
    decode_with_reporter(payload, mode, &NoopReporter)
}

/// Decodes one delimited frame and reports the outcome to `reporter`.
pub fn decode_with_reporter<R>(
    payload: &[u8],
    mode: Mode,
    reporter: &R,
) -> Result<Frame, DecodeError>
where
    R: OutcomeReporter + ?Sized,
{
    let result = match mode {
        Mode::Historic => historic::decode_historic(payload).map(|decoded| {
            for observation in &decoded.observations {
                reporter.observe(observation);
            }
            decoded.frame
        }),
        Mode::Standard => standard::decode_standard(payload),
    };

    match &result {
        Ok(frame) => {
            debug!("decoded {mode} frame with {} fields", frame.len());
            reporter.frame_decoded();
        }
        Err(err) => {
            warn!("error decoding {mode} frame: {err}");
            reporter.decode_error(err.kind());
        }
    }
    result
}

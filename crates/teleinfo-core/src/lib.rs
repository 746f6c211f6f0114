//! Teleinfo core library for decoding electricity meter frames.
//!
//! This crate decodes one delimited Teleinfo frame at a time, in either the
//! historic or the standard wire format. Each field is split into its
//! segments, its checksum is recomputed and compared, and validated values
//! are collected into an immutable [`Frame`]. Decoding is byte-oriented and
//! side-effect free apart from the injected [`OutcomeReporter`]; file access
//! is isolated in `source`.
//!
//! Invariants:
//! - The first invalid field aborts the decode; partial frames are never returned.
//! - Historic decoding only accepts known field names.
//! - Every decode attempt reports exactly one outcome.
//!
//! Version française (résumé):
//! Cette crate décode une trame Téléinfo (mode historique ou standard) :
//! découpage des groupes, vérification du checksum de chaque groupe, puis
//! construction d'une trame immuable. Les E/S restent dans `source`, les
//! compteurs d'issues sont injectés via `OutcomeReporter`.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use teleinfo_core::{Mode, decode_frame_file};
//!
//! let report = decode_frame_file(Path::new("frame.txt"), Mode::Historic)?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod frame;
mod outcome;
mod pipeline;
pub mod protocol;
mod source;

pub use frame::Frame;
pub use outcome::{
    CountingReporter, Label, NoopReporter, Observation, OutcomeCounters, OutcomeReporter,
};
pub use pipeline::{PipelineError, decode_frame_file, decode_source};
pub use protocol::{DecodeError, ErrorKind, Mode, ParseModeError, decode, decode_with_reporter};
pub use source::{FileFrameSource, FrameSource, MAX_FRAME_BYTES, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the input modification time is unavailable.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Result of decoding one frame file.
///
/// # Examples
/// ```
/// use teleinfo_core::{Mode, make_stub_report};
///
/// let report = make_stub_report("frame.txt", 42, Mode::Historic);
/// assert_eq!(report.report_version, teleinfo_core::REPORT_VERSION);
/// assert!(report.frame.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp of the input file's last modification.
    pub generated_at: String,
    /// Input file metadata.
    pub input: InputInfo,
    /// Mode the frame was decoded with.
    pub mode: Mode,
    /// Decoded frame, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameSummary>,
    /// Read or decode failure, when one occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorSummary>,
    /// Outcome counters for this run.
    pub counters: OutcomeCounters,
    /// Numeric projections, ordered by series.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
///
/// # Examples
/// ```
/// use teleinfo_core::InputInfo;
///
/// let input = InputInfo {
///     path: "frame.txt".to_string(),
///     bytes: 128,
/// };
/// assert_eq!(input.bytes, 128);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Decoded frame with its derived type and mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Tariff option (`OPTARIF`), empty for standard frames.
    pub frame_type: String,
    /// Mode derived from the frame content.
    pub mode: Mode,
    /// Field values in name order.
    pub fields: Frame,
}

/// Stage at which a frame was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStage {
    Read,
    Decode,
}

/// Failure summary embedded in reports.
///
/// # Examples
/// ```
/// use teleinfo_core::{ErrorStage, ErrorSummary};
///
/// let error = ErrorSummary {
///     stage: ErrorStage::Decode,
///     error_type: "checksum_error".to_string(),
///     message: "invalid checksum".to_string(),
/// };
/// assert_eq!(error.stage, ErrorStage::Decode);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub stage: ErrorStage,
    /// Outcome label (`invalid_field`, `checksum_error`, `io`, ...).
    pub error_type: String,
    /// Human-readable diagnostic.
    pub message: String,
}

/// Build a report with base fields filled and no outcome yet.
pub fn make_stub_report(input_path: &str, input_bytes: u64, mode: Mode) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "teleinfo".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        mode,
        frame: None,
        error: None,
        counters: OutcomeCounters::default(),
        observations: Vec::new(),
    }
}

use std::path::Path;
use std::time::SystemTime;

use log::{info, warn};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::outcome::{CountingReporter, OutcomeReporter};
use crate::protocol::{Mode, decode_with_reporter};
use crate::source::{FileFrameSource, FrameSource, SourceError};
use crate::{DEFAULT_GENERATED_AT, ErrorStage, ErrorSummary, FrameSummary, Report, make_stub_report};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decodes the frame stored in `path` and builds a report.
pub fn decode_frame_file(path: &Path, mode: Mode) -> Result<Report, PipelineError> {
    let source = FileFrameSource::open(path)?;
    decode_source(path, source, mode)
}

/// Decodes the next frame of `source` and builds a report.
///
/// Read and decode failures are recorded in the report rather than returned;
/// only failures to inspect `path` itself are errors.
pub fn decode_source<S: FrameSource>(
    path: &Path,
    mut source: S,
    mode: Mode,
) -> Result<Report, PipelineError> {
    let reporter = CountingReporter::new();
    let meta = path.metadata()?;
    let mut report = make_stub_report(&path.display().to_string(), meta.len(), mode);
    report.generated_at = meta
        .modified()
        .ok()
        .and_then(system_time_to_rfc3339)
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());

    match source.next_frame() {
        Ok(Some(payload)) => {
            reporter.frame_read();
            match decode_with_reporter(&payload, mode, &reporter) {
                Ok(frame) => {
                    info!("{}: decoded {} fields", path.display(), frame.len());
                    report.frame = Some(FrameSummary {
                        frame_type: frame.frame_type().to_string(),
                        mode: frame.mode(),
                        fields: frame,
                    });
                }
                Err(err) => {
                    report.error = Some(ErrorSummary {
                        stage: ErrorStage::Decode,
                        error_type: err.kind().as_str().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
        Ok(None) => {}
        Err(err) => {
            warn!("{}: frame read failed: {err}", path.display());
            reporter.frame_read_error(err.error_type());
            report.error = Some(ErrorSummary {
                stage: ErrorStage::Read,
                error_type: err.error_type().to_string(),
                message: err.to_string(),
            });
        }
    }

    report.counters = reporter.counters();
    report.observations = reporter.observations();
    Ok(report)
}

fn system_time_to_rfc3339(ts: SystemTime) -> Option<String> {
    OffsetDateTime::from(ts).format(&Rfc3339).ok()
}

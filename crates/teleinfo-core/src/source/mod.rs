//! Raw frame acquisition.
//!
//! Sources hand over one already-delimited frame at a time; they never
//! reassemble frames from a byte stream.

mod file;

pub use file::{FileFrameSource, MAX_FRAME_BYTES};

use thiserror::Error;

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame too large: more than {limit} bytes")]
    TooLarge { limit: usize },
}

impl SourceError {
    /// Label reported through `OutcomeReporter::frame_read_error`.
    pub fn error_type(&self) -> &'static str {
        match self {
            SourceError::Io(_) => "io",
            SourceError::TooLarge { .. } => "frame_too_large",
        }
    }
}

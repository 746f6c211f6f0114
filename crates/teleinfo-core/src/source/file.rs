use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::{FrameSource, SourceError};

/// Upper bound on the size of a captured frame file.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

/// Source yielding the whole content of one file as a single frame.
pub struct FileFrameSource {
    file: Option<File>,
}

impl FileFrameSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self { file: Some(file) })
    }
}

impl FrameSource for FileFrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let Some(file) = self.file.take() else {
            return Ok(None);
        };
        let mut data = Vec::new();
        file.take(MAX_FRAME_BYTES as u64 + 1).read_to_end(&mut data)?;
        if data.len() > MAX_FRAME_BYTES {
            return Err(SourceError::TooLarge {
                limit: MAX_FRAME_BYTES,
            });
        }
        debug!("read frame of {} bytes", data.len());
        Ok(Some(data))
    }
}

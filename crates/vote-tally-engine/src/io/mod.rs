use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Topic;
use crate::report;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the transcript file in full. No streaming; the segmenter works on
/// the whole content.
pub fn read_transcript(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write the CSV report to `path`, overwriting any existing file.
pub fn write_report(path: &Path, rows: &[Topic]) -> Result<(), IoError> {
    let file = fs::File::create(path).map_err(IoError::Io)?;
    report::write_csv(file, rows).map_err(IoError::Io)
}

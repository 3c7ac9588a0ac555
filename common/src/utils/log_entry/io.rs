use std::io::Error as IoError;
use std::path::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IOEntry<'a> {
    #[error("Failed to create directory {0}: {1}")]
    CreateDirectoryError(Display<'a>, IoError),
    #[error("Failed to delete directory {0}: {1}")]
    DeleteDirectoryError(Display<'a>, IoError),
    #[error("Failed to delete file {0}: {1}")]
    DeleteFileError(Display<'a>, IoError),
    #[error("Failed to read directory {0}: {1}")]
    ReadDirectoryError(Display<'a>, IoError),
    #[error("Failed to read file {0}: {1}")]
    ReadFileError(Display<'a>, IoError),
    #[error("Failed to read metadata of {0}: {1}")]
    ReadMetadataError(Display<'a>, IoError),
    #[error("Failed to write file {0}: {1}")]
    WriteFileError(Display<'a>, IoError),
}

impl From<IOEntry<'_>> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}

use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionEntry {
    #[error("Failed to launch detector process: {0}")]
    LaunchError(IoError),
    #[error("Detector process output stream unavailable")]
    OutputStreamError,
    #[error("Failed to read detector output: {0}")]
    ReadOutputError(IoError),
    #[error("Detector process exited with code {0}")]
    ProcessError(i32),
    #[error("Detector process was terminated by a signal")]
    ProcessKilledError,
    #[error("Detector process exceeded the {0} second deadline")]
    DeadlineExceededError(u64),
    #[error("Failed to wait for detector process: {0}")]
    WaitProcessError(IoError),
    #[error("Skipped malformed detection line")]
    MalformedLineError,
    #[error("Detection run completed with {0} detections")]
    RunComplete(usize),
    #[error("No weight recognized in detector output")]
    NoWeightRecognized,
}

impl From<DetectionEntry> for String {
    #[inline(always)]
    fn from(value: DetectionEntry) -> Self {
        value.to_string()
    }
}

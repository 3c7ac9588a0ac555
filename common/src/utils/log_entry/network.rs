use std::io::Error as IOError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkEntry {
    #[error("Failed to bind port: {0}")]
    BindPortError(IOError),
}

impl From<NetworkEntry> for String {
    #[inline(always)]
    fn from(value: NetworkEntry) -> Self {
        value.to_string()
    }
}

//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Invalid mesh for {format}: {message}")]
    InvalidMesh { format: String, message: String },
    
    #[error("Write error: {message}")]
    WriteError { message: String },
}

impl From<IoError> for ringcrate_core::Error {
    fn from(err: IoError) -> Self {
        ringcrate_core::Error::InvalidData(err.to_string())
    }
}

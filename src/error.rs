//! The engine's single error type.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AionError>;

#[derive(Error, Debug)]
pub enum AionError {
    /// IR failed to parse.
    #[error("parse error: {0}")]
    ParseError(String),

    /// IR failed structural verification, before or after the pipeline.
    #[error("verification failed: {0}")]
    VerifyError(String),

    /// A requested file could not be opened or read.
    #[error("I/O error for {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// Mutually exclusive inputs were supplied.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// An invariant was violated (null module, corrupt alignment).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<aion_ir::IrParseError> for AionError {
    fn from(err: aion_ir::IrParseError) -> Self {
        AionError::ParseError(err.to_string())
    }
}

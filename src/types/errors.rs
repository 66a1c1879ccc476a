use std::io;
use thiserror::Error;

/// Errors produced while reading a `.dbc` file.
///
/// Only the I/O layer can fail: once the bytes are in memory, parsing is total and
/// malformed records are skipped.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DbcParseError {
    /// Path of the document that could not be read.
    pub fn path(&self) -> &str {
        match self {
            DbcParseError::OpenFile { path, .. } | DbcParseError::Read { path, .. } => path,
        }
    }
}

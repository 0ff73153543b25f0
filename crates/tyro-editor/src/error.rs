//! Editor-core error type.
//!
//! Only file operations can fail recoverably; everything else in the core
//! is infallible by construction (out-of-range operations are silent
//! no-ops, matching the document contract). The variants keep the
//! underlying `io::Error` as the source so the binary's error chain still
//! ends in the OS error string.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from document file operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read when opening.
    #[error("can't open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The buffer could not be written back to disk.
    #[error("I/O error: {source}")]
    Save {
        #[source]
        source: io::Error,
    },

    /// Save was requested on a buffer with no file name.
    #[error("no file name set")]
    NoFilename,
}

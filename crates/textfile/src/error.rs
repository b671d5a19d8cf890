use std::io;

use thiserror::Error;

/// Errors surfaced by [`TextFile`](crate::TextFile) and the fetch layer.
///
/// Malformed UTF-8 has no variant: it is recovered by switching the
/// handle to its fallback encoding and never reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying stream failed to open, read, write or seek.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The operation needs an open stream.
    #[error("no stream is open")]
    NotOpen,
    /// The stream opened for writing was asked to read.
    #[error("stream is not open for reading")]
    NotReadable,
    /// The stream opened for reading was asked to write.
    #[error("stream is not open for writing")]
    NotWritable,
    /// The first two bytes looked like a UTF-8 byte order mark but the third
    /// byte could not be read.
    #[error("truncated byte order mark")]
    TruncatedBom,
    /// The network transport reported a failure.
    #[error("fetch failed: {0}")]
    Fetch(String),
    /// The remote resource produced no bytes.
    #[error("downloaded resource is empty")]
    EmptyDownload,
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

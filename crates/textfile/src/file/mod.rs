//! The encoding-aware text file handle.
//!
//! Overview
//! - [`TextFile::open`] probes for a byte order mark and picks the read path:
//!   the platform text path for [`Encoding::SystemText`], the byte window plus
//!   a per-encoding decoder for everything else.
//! - Positions are logical: they never count the byte order mark nor bytes the
//!   window has read ahead. See `position.rs`.
//! - Malformed UTF-8 switches the handle to its fallback encoding for good and
//!   replays the current line. See `fallback.rs`.
//! - Writes go through the per-encoding encoder after [`TextFile::save`] has
//!   emitted the byte order mark. See `write.rs`.

mod fallback;
mod position;
mod read;
mod write;

use core::fmt;
use std::{io::Write as _, path::Path};

pub use read::{Lines, WideLines};

use crate::{
    Encoding, TextFileOptions, bom,
    error::{Error, Result},
    stream::{OpenMode, Stream},
    window::Window,
};

/// Buffered, encoding-aware sequential reader and writer over one file.
///
/// One handle serves one stream at a time. It is not meant to be shared
/// between threads; use one handle per stream instead.
///
/// # Examples
///
/// ```rust
/// use textfile::{Encoding, TextFile};
///
/// # fn main() -> textfile::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("greeting.txt");
///
/// let mut out = TextFile::default();
/// out.save(&path, Encoding::Utf16Le)?;
/// out.write_str("hi\nbye")?;
/// out.close();
///
/// let mut file = TextFile::default();
/// file.open(&path)?;
/// assert_eq!(file.encoding(), Encoding::Utf16Le);
/// assert_eq!(file.read_line_wide()?.unwrap(), "hi");
/// assert_eq!(file.read_line_wide()?.unwrap(), "bye");
/// assert!(file.read_line_wide()?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct TextFile {
    encoding: Encoding,
    default_encoding: Encoding,
    bom_offset: u64,
    stream: Option<Stream>,
    window: Window,
}

impl TextFile {
    /// Creates a closed handle.
    #[must_use]
    pub fn new(options: TextFileOptions) -> Self {
        Self {
            encoding: options.encoding,
            default_encoding: options.default_encoding,
            bom_offset: 0,
            stream: None,
            window: Window::with_capacity(options.buffer_capacity),
        }
    }

    /// Opens `path` for reading, closing any previously open stream.
    ///
    /// A byte order mark overrides the current encoding. Without one the
    /// current encoding is kept, and [`Encoding::SystemText`] switches to the
    /// platform text path.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be opened or probed, and
    /// [`Error::TruncatedBom`] for a cut-off UTF-8 mark. The handle is closed
    /// afterwards.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.close();
        let path = path.as_ref();

        let mut stream = Stream::open(path, OpenMode::ReadBinary)?;
        let length = stream.length()?;
        let detection = bom::detect(&mut stream, length, self.encoding)?;

        self.encoding = detection.encoding;
        self.bom_offset = detection.offset;
        self.stream = Some(stream);

        if !self.encoding.is_buffered() {
            self.reopen(OpenMode::ReadText)?;
        }

        tracing::debug!(
            path = %path.display(),
            encoding = %self.encoding,
            bom_offset = self.bom_offset,
            "opened"
        );
        Ok(())
    }

    /// Creates (or truncates) `path` for writing in `encoding` and writes the
    /// encoding's byte order mark.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the file cannot be created or the mark cannot be
    /// written. The handle is closed afterwards.
    pub fn save(&mut self, path: impl AsRef<Path>, encoding: Encoding) -> Result<()> {
        self.close();
        let path = path.as_ref();

        let mode = if encoding.is_buffered() {
            OpenMode::WriteBinary
        } else {
            OpenMode::WriteText
        };
        let mut stream = Stream::open(path, mode)?;
        stream.write_all(encoding.bom())?;

        self.encoding = encoding;
        self.bom_offset = encoding.bom().len() as u64;
        self.stream = Some(stream);

        tracing::debug!(path = %path.display(), %encoding, "saving");
        Ok(())
    }

    /// Closes the stream and discards buffered bytes. Closing a closed handle
    /// does nothing.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(error) = stream.flush() {
                tracing::warn!(%error, "flush on close failed");
            }
            tracing::debug!(path = %stream.path().display(), "closed");
        }
        self.window.clear();
        self.bom_offset = 0;
    }

    /// Returns `true` while a stream is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Current encoding.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Replaces the current encoding. Takes effect on the next read or write.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// Encoding adopted after malformed UTF-8.
    #[must_use]
    pub fn default_encoding(&self) -> Encoding {
        self.default_encoding
    }

    /// Returns `true` for UTF-8 and both UTF-16 byte orders.
    #[must_use]
    pub fn is_unicode(&self) -> bool {
        self.encoding.is_unicode()
    }

    /// Path of the open stream.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.stream.as_ref().map(Stream::path)
    }

    /// Length of the byte order mark in front of the content.
    #[must_use]
    pub fn bom_offset(&self) -> u64 {
        self.bom_offset
    }

    /// Replaces the stream by a fresh one on the same path. The byte order
    /// mark offset is kept so logical positions stay valid.
    fn reopen(&mut self, mode: OpenMode) -> Result<()> {
        let path = self
            .stream
            .take()
            .ok_or(Error::NotOpen)?
            .path()
            .to_path_buf();
        self.window.clear();

        match Stream::open(&path, mode) {
            Ok(stream) => {
                self.stream = Some(stream);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e.into())
            }
        }
    }

    fn stream_mut(&mut self) -> Result<&mut Stream> {
        self.stream.as_mut().ok_or(Error::NotOpen)
    }
}

impl Default for TextFile {
    fn default() -> Self {
        Self::new(TextFileOptions::default())
    }
}

impl Drop for TextFile {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for TextFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFile")
            .field("path", &self.file_path())
            .field("encoding", &self.encoding)
            .field("default_encoding", &self.default_encoding)
            .field("bom_offset", &self.bom_offset)
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn failed_open_leaves_handle_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = TextFile::default();
        assert!(matches!(
            file.open(dir.path().join("missing.txt")),
            Err(Error::Io(_))
        ));
        assert!(!file.is_open());
        assert_eq!(file.position(), 0);
        assert_eq!(file.length(), 0);
    }

    #[test]
    fn open_replaces_previous_stream() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, b"\xEF\xBB\xBFa").unwrap();
        fs::write(&b, b"bb").unwrap();

        let mut file = TextFile::default();
        file.open(&a).unwrap();
        assert_eq!(file.bom_offset(), 3);
        file.open(&b).unwrap();
        assert_eq!(file.file_path(), Some(b.as_path()));
        // The encoding a mark selected sticks to the handle.
        assert_eq!(file.encoding(), Encoding::Utf8);
        assert_eq!(file.bom_offset(), 0);
    }

    #[test]
    fn save_writes_the_mark_and_reports_logical_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut file = TextFile::default();
        file.save(&path, Encoding::Utf8).unwrap();
        assert_eq!(file.position(), 0);
        assert!(file.is_unicode());
        file.close();
        assert_eq!(fs::read(&path).unwrap(), [0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn closing_twice_is_harmless() {
        let mut file = TextFile::default();
        file.close();
        file.close();
        assert!(file.file_path().is_none());
    }
}

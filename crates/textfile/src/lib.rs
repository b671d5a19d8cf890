//! Buffered, encoding-aware line reading and writing for text files.
//!
//! [`TextFile`] detects a byte order mark on open, decodes lines in one of the
//! [`Encoding`]s either as raw bytes ([`TextFile::read_line`]) or as UTF-16
//! code units ([`TextFile::read_line_wide`]), keeps positions logical across
//! its read-ahead window, and writes text back with the matching byte order
//! mark and newline convention. A UTF-8 stream that turns out to be malformed
//! is reread in the handle's fallback encoding instead of failing.
//!
//! ```rust
//! use textfile::{Encoding, TextFile, TextFileOptions};
//!
//! # fn main() -> textfile::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("subs.txt");
//! std::fs::write(&path, b"\xEF\xBB\xBFcaf\xC3\xA9\r\nbar\n")?;
//!
//! let mut file = TextFile::new(TextFileOptions::default());
//! file.open(&path)?;
//! assert_eq!(file.encoding(), Encoding::Utf8);
//!
//! let lines: Vec<String> = file
//!     .lines_wide()
//!     .map(|line| line.map(|l| l.to_string_lossy()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(lines, ["café", "bar"]);
//! # Ok(())
//! # }
//! ```
//!
//! Remote `http://` and `https://` locations are handled by [`web`].

pub mod bom;
mod decode;
pub mod encode;
mod encoding;
mod error;
mod file;
mod options;
mod stream;
pub mod web;
pub mod wide;
pub mod window;

pub use encoding::Encoding;
pub use error::{Error, Result};
pub use file::{Lines, TextFile, WideLines};
pub use options::{FetchOptions, TextFileOptions};
pub use wide::{NotNarrow, PLACEHOLDER, WideStr, WideString, widen};

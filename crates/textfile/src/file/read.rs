use std::io::SeekFrom;

use bstr::BString;

use super::TextFile;
use crate::{
    WideString,
    decode::{self, LineBuffer, Outcome, push_platform_line},
    error::{Error, Result},
};

impl TextFile {
    /// Reads the next line as a raw-byte string.
    ///
    /// Characters above 0xFF are stored as
    /// [`PLACEHOLDER`](crate::PLACEHOLDER); lines read through the platform
    /// text path keep their bytes unchanged. Returns `Ok(None)` at end of
    /// stream.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`], [`Error::NotReadable`], or [`Error::Io`] from the
    /// underlying stream (including reopening it after malformed UTF-8).
    pub fn read_line(&mut self) -> Result<Option<BString>> {
        let mut line = BString::default();
        Ok(self.read_into(&mut line)?.then_some(line))
    }

    /// Reads the next line as UTF-16 code units. Returns `Ok(None)` at end of
    /// stream.
    ///
    /// # Errors
    ///
    /// As for [`TextFile::read_line`].
    pub fn read_line_wide(&mut self) -> Result<Option<WideString>> {
        let mut line = WideString::new();
        Ok(self.read_into(&mut line)?.then_some(line))
    }

    /// Iterates over the remaining lines as raw-byte strings.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { file: self }
    }

    /// Iterates over the remaining lines as UTF-16 code units.
    pub fn lines_wide(&mut self) -> WideLines<'_> {
        WideLines { file: self }
    }

    /// Appends the next line to `out`; `false` means end of stream.
    pub(super) fn read_into<L: LineBuffer>(&mut self, out: &mut L) -> Result<bool> {
        let stream = self.stream.as_ref().ok_or(Error::NotOpen)?;
        if !stream.mode().is_read() {
            return Err(Error::NotReadable);
        }

        if self.encoding.is_buffered() {
            self.read_buffered(out)
        } else {
            self.read_platform(out)
        }
    }

    fn read_platform<L: LineBuffer>(&mut self, out: &mut L) -> Result<bool> {
        // Read-ahead from a previous buffered encoding has to be given back.
        if !self.window.is_empty() {
            let position = self.position();
            self.window.clear();
            self.seek(SeekFrom::Start(position))?;
        }

        let mut raw = Vec::new();
        if self.stream_mut()?.read_until_newline(&mut raw)? == 0 {
            return Ok(false);
        }
        push_platform_line(&raw, out);
        Ok(true)
    }

    fn read_buffered<L: LineBuffer>(&mut self, out: &mut L) -> Result<bool> {
        let line_start = self.position();
        let encoding = self.encoding;
        let mut produced = 0;
        let mut at_eof = false;

        loop {
            let step = decode::step(encoding, self.window.unread(), at_eof, out);
            self.window.consume(step.consumed);
            produced += step.produced;

            match step.outcome {
                Outcome::LineEnd => return Ok(true),
                Outcome::Invalid => return self.fall_back(line_start, out),
                Outcome::Exhausted if at_eof => return Ok(produced > 0),
                Outcome::Exhausted => {
                    let stream = self.stream.as_mut().ok_or(Error::NotOpen)?;
                    at_eof = self.window.fill(stream)?;
                }
            }
        }
    }
}

/// Iterator over raw-byte lines, created by [`TextFile::lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    file: &'a mut TextFile,
}

impl Iterator for Lines<'_> {
    type Item = Result<BString>;

    fn next(&mut self) -> Option<Self::Item> {
        self.file.read_line().transpose()
    }
}

/// Iterator over wide lines, created by [`TextFile::lines_wide`].
#[derive(Debug)]
pub struct WideLines<'a> {
    file: &'a mut TextFile,
}

impl Iterator for WideLines<'_> {
    type Item = Result<WideString>;

    fn next(&mut self) -> Option<Self::Item> {
        self.file.read_line_wide().transpose()
    }
}

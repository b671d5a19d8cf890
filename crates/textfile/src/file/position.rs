use std::io::{Seek as _, SeekFrom};

use super::TextFile;
use crate::error::{Error, Result};

impl TextFile {
    /// Logical offset of the next unread (or unwritten) byte.
    ///
    /// Excludes the byte order mark and whatever the read window holds ahead
    /// of the decoder. A closed handle reports 0.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.stream.as_ref().map_or(0, |stream| {
            stream
                .position()
                .saturating_sub(self.bom_offset)
                .saturating_sub(self.window.unread_len() as u64)
        })
    }

    /// Length of the content after the byte order mark. A closed handle, or
    /// one whose metadata cannot be read, reports 0.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.stream
            .as_ref()
            .and_then(|stream| stream.length().ok())
            .map_or(0, |len| len.saturating_sub(self.bom_offset))
    }

    /// Moves to a logical position and returns it.
    ///
    /// The target is clamped to `[0, length]`. When it falls inside the bytes
    /// the read window already holds, only the window cursor moves; otherwise
    /// the window is dropped and the stream itself is repositioned.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`], or [`Error::Io`] when the stream refuses the seek.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        if self.stream.is_none() {
            return Err(Error::NotOpen);
        }

        let length = i128::from(self.length());
        let current = i128::from(self.position());
        let target = match pos {
            SeekFrom::Start(n) => i128::from(n),
            SeekFrom::End(delta) => length + i128::from(delta),
            SeekFrom::Current(delta) => current + i128::from(delta),
        }
        .clamp(0, length);

        if !self.window.is_empty() {
            if let Ok(delta) = i64::try_from(target - current) {
                if self.window.reposition(delta) {
                    tracing::trace!(to = %target, "seek served by the window");
                    return Ok(self.position());
                }
            }
            self.window.clear();
        }

        let offset = u64::try_from(target).unwrap_or_default() + self.bom_offset;
        tracing::trace!(to = %target, offset, "physical seek");
        self.stream_mut()?.seek(SeekFrom::Start(offset))?;
        Ok(self.position())
    }
}

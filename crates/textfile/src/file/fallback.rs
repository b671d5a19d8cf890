use std::io::SeekFrom;

use super::TextFile;
use crate::{Encoding, decode::LineBuffer, error::Result, stream::OpenMode};

impl TextFile {
    /// Encoding adopted after malformed UTF-8. Never UTF-8 itself, which would
    /// fail on the same bytes again.
    pub(super) fn fallback_encoding(&self) -> Encoding {
        match self.default_encoding {
            Encoding::Utf8 => Encoding::SystemText,
            other => other,
        }
    }

    /// Abandons UTF-8 for the rest of the stream and re-reads the line that
    /// started at logical offset `line_start`.
    ///
    /// The stream is reopened on the same path so the new encoding starts from
    /// a clean handle; the byte order mark offset is kept, so `line_start`
    /// still addresses the same byte. Whatever part of the line was already
    /// decoded is discarded, so the caller sees exactly one line.
    pub(super) fn fall_back<L: LineBuffer>(
        &mut self,
        line_start: u64,
        out: &mut L,
    ) -> Result<bool> {
        let from = self.encoding;
        let to = self.fallback_encoding();
        tracing::warn!(line_start, %from, %to, "malformed UTF-8, switching encoding");

        self.encoding = to;
        self.window.clear();
        self.reopen(if to.is_buffered() {
            OpenMode::ReadBinary
        } else {
            OpenMode::ReadText
        })?;
        self.seek(SeekFrom::Start(line_start))?;

        out.clear_line();
        self.read_into(out)
    }
}

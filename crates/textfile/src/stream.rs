//! The byte stream a [`TextFile`](crate::TextFile) sits on.
//!
//! A thin wrapper over [`File`] that remembers how it was opened and tracks
//! its own physical position, so position queries never need `&mut`.
//! Platform-text modes share the byte layout of the binary modes on every
//! supported target; they differ in how the owner splits lines.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

/// How a stream was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenMode {
    ReadBinary,
    WriteBinary,
    ReadText,
    WriteText,
}

impl OpenMode {
    pub(crate) fn is_read(self) -> bool {
        matches!(self, Self::ReadBinary | Self::ReadText)
    }
}

#[derive(Debug)]
enum Handle {
    Reader(BufReader<File>),
    Writer(File),
}

#[derive(Debug)]
pub(crate) struct Stream {
    handle: Handle,
    mode: OpenMode,
    path: PathBuf,
    pos: u64,
}

impl Stream {
    pub(crate) fn open(path: &Path, mode: OpenMode) -> io::Result<Self> {
        let handle = if mode.is_read() {
            Handle::Reader(BufReader::new(File::open(path)?))
        } else {
            Handle::Writer(File::create(path)?)
        };
        Ok(Self {
            handle,
            mode,
            path: path.to_path_buf(),
            pos: 0,
        })
    }

    pub(crate) fn mode(&self) -> OpenMode {
        self.mode
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Physical offset of the next byte to be read or written.
    pub(crate) fn position(&self) -> u64 {
        self.pos
    }

    pub(crate) fn length(&self) -> io::Result<u64> {
        let file = match &self.handle {
            Handle::Reader(r) => r.get_ref(),
            Handle::Writer(w) => w,
        };
        Ok(file.metadata()?.len())
    }

    /// Reads through the next `\n` (inclusive) into `buf`; returns 0 at end
    /// of stream.
    pub(crate) fn read_until_newline(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let Handle::Reader(reader) = &mut self.handle else {
            return Err(not_readable());
        };
        let n = reader.read_until(b'\n', buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

fn not_readable() -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, "stream is open for writing")
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Handle::Reader(reader) = &mut self.handle else {
            return Err(not_readable());
        };
        let n = reader.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Handle::Writer(file) = &mut self.handle else {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stream is open for reading",
            ));
        };
        let n = file.write(buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.handle {
            Handle::Reader(_) => Ok(()),
            Handle::Writer(file) => file.flush(),
        }
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.pos = match &mut self.handle {
            Handle::Reader(r) => r.seek(pos)?,
            Handle::Writer(w) => w.seek(pos)?,
        };
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn tracks_position_across_reads_and_seeks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.txt");
        fs::write(&path, b"one\ntwo\n").unwrap();

        let mut s = Stream::open(&path, OpenMode::ReadText).unwrap();
        assert_eq!(s.length().unwrap(), 8);

        let mut line = Vec::new();
        assert_eq!(s.read_until_newline(&mut line).unwrap(), 4);
        assert_eq!(s.position(), 4);

        let mut byte = [0u8; 1];
        s.read_exact(&mut byte).unwrap();
        assert_eq!(&byte, b"t");
        assert_eq!(s.position(), 5);

        assert_eq!(s.seek(SeekFrom::Start(1)).unwrap(), 1);
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn write_mode_counts_written_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.txt");
        let mut s = Stream::open(&path, OpenMode::WriteBinary).unwrap();
        s.write_all(b"abc").unwrap();
        assert_eq!(s.position(), 3);
        assert_eq!(s.length().unwrap(), 3);
        assert!(s.read(&mut [0u8; 1]).is_err());
        assert_eq!(s.mode(), OpenMode::WriteBinary);
    }
}

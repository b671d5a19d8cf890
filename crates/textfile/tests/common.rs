#![allow(missing_docs, dead_code)]

use std::{fs, path::PathBuf};

use tempfile::TempDir;
use textfile::{Encoding, TextFile, TextFileOptions};

pub const ENCODINGS: [Encoding; 5] = [
    Encoding::SystemText,
    Encoding::Identity8Bit,
    Encoding::Utf8,
    Encoding::Utf16Le,
    Encoding::Utf16Be,
];

/// A scratch file that lives as long as the value.
pub struct Scratch {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Scratch {
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.txt");
        fs::write(&path, bytes).unwrap();
        Self { _dir: dir, path }
    }

    pub fn empty() -> Self {
        Self::with_bytes(b"")
    }

    pub fn open(&self, options: TextFileOptions) -> TextFile {
        let mut file = TextFile::new(options);
        file.open(&self.path).unwrap();
        file
    }

    pub fn bytes(&self) -> Vec<u8> {
        fs::read(&self.path).unwrap()
    }
}

/// Options that read a mark-less file back in `encoding`.
pub fn reading(encoding: Encoding) -> TextFileOptions {
    TextFileOptions {
        encoding,
        ..Default::default()
    }
}

pub fn wide_lines(file: &mut TextFile) -> Vec<String> {
    file.lines_wide()
        .map(|line| line.unwrap().to_string_lossy())
        .collect()
}

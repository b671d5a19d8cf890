//! Byte order mark detection.
//!
//! Only the marks written by [`Encoding::bom`] are recognised, probed in the
//! fixed order `FF FE`, `FE FF`, `EF BB BF`. A stream without a mark keeps the
//! caller's encoding.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::{
    Encoding,
    error::{Error, Result},
};

/// Outcome of probing the head of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Encoding announced by the mark, or the caller's default.
    pub encoding: Encoding,
    /// Bytes to skip before the first logical byte.
    pub offset: u64,
}

impl Detection {
    /// Returns `true` when a byte order mark was found.
    #[must_use]
    pub fn has_bom(&self) -> bool {
        self.offset != 0
    }
}

/// Probes the first bytes of `reader`, which must be positioned at offset 0.
///
/// `length` is the total stream length; streams shorter than two bytes are not
/// probed at all. On return the reader is positioned just past the mark, or
/// back at offset 0 when no mark matched.
///
/// # Errors
///
/// [`Error::TruncatedBom`] when the stream starts with `EF BB`, claims at
/// least three bytes, and the third one cannot be read. Any other read or seek
/// failure is returned as [`Error::Io`].
pub fn detect<R: Read + Seek>(reader: &mut R, length: u64, default: Encoding) -> Result<Detection> {
    let mut detection = Detection {
        encoding: default,
        offset: 0,
    };

    if length >= 2 {
        let mut head = [0u8; 2];
        reader.read_exact(&mut head)?;

        match head {
            [0xFF, 0xFE] => {
                detection = Detection {
                    encoding: Encoding::Utf16Le,
                    offset: 2,
                };
            }
            [0xFE, 0xFF] => {
                detection = Detection {
                    encoding: Encoding::Utf16Be,
                    offset: 2,
                };
            }
            [0xEF, 0xBB] if length >= 3 => {
                let mut third = [0u8; 1];
                reader.read_exact(&mut third).map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => Error::TruncatedBom,
                    _ => Error::Io(e),
                })?;
                if third[0] == 0xBF {
                    detection = Detection {
                        encoding: Encoding::Utf8,
                        offset: 3,
                    };
                }
            }
            _ => {}
        }
    }

    // The probe may have consumed bytes that belong to the content.
    if !detection.has_bom() {
        reader.seek(SeekFrom::Start(0))?;
    }

    tracing::debug!(
        encoding = %detection.encoding,
        offset = detection.offset,
        "byte order mark probe"
    );
    Ok(detection)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    fn probe(bytes: &[u8], default: Encoding) -> (Detection, u64) {
        let mut cursor = Cursor::new(bytes.to_vec());
        let detection = detect(&mut cursor, bytes.len() as u64, default).unwrap();
        (detection, cursor.position())
    }

    #[rstest]
    #[case::utf16le(&[0xFF, 0xFE, b'h', 0], Encoding::Utf16Le, 2)]
    #[case::utf16be(&[0xFE, 0xFF, 0, b'h'], Encoding::Utf16Be, 2)]
    #[case::utf8(&[0xEF, 0xBB, 0xBF, b'h'], Encoding::Utf8, 3)]
    #[case::utf8_bom_only(&[0xEF, 0xBB, 0xBF], Encoding::Utf8, 3)]
    #[case::utf16le_bom_only(&[0xFF, 0xFE], Encoding::Utf16Le, 2)]
    fn marks_select_encoding_and_offset(
        #[case] bytes: &[u8],
        #[case] encoding: Encoding,
        #[case] offset: u64,
    ) {
        let (detection, position) = probe(bytes, Encoding::SystemText);
        assert_eq!(detection, Detection { encoding, offset });
        assert_eq!(position, offset, "reader must sit just past the mark");
    }

    #[rstest]
    #[case::plain_ascii(b"AB")]
    #[case::partial_utf8_mark(&[0xEF, 0xBB])]
    #[case::wrong_third_byte(&[0xEF, 0xBB, 0x00, 0x41])]
    #[case::single_byte(b"A")]
    #[case::empty(b"")]
    fn unmarked_streams_keep_the_default(#[case] bytes: &[u8]) {
        let (detection, position) = probe(bytes, Encoding::Identity8Bit);
        assert_eq!(
            detection,
            Detection {
                encoding: Encoding::Identity8Bit,
                offset: 0
            }
        );
        assert!(!detection.has_bom());
        assert_eq!(position, 0, "probe bytes must be given back");
    }

    #[test]
    fn missing_third_byte_is_a_truncated_mark() {
        // Claims three bytes but only two are there.
        let mut cursor = Cursor::new(vec![0xEF, 0xBB]);
        let err = detect(&mut cursor, 3, Encoding::SystemText).unwrap_err();
        assert!(matches!(err, Error::TruncatedBom), "got {err:?}");
    }
}

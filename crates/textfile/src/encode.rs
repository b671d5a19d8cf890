//! Per-encoding byte layout for written text.
//!
//! Every encoding except [`Encoding::SystemText`] writes each `\n` as `\r\n`.
//! Characters an encoding cannot carry are written as [`PLACEHOLDER`].

use crate::{Encoding, wide::PLACEHOLDER};

/// Appends the bytes for narrow `text` to `out`.
///
/// Unicode encodings treat each byte as the character with the same value.
pub fn encode_narrow(encoding: Encoding, text: &[u8], out: &mut Vec<u8>) {
    match encoding {
        Encoding::SystemText => out.extend_from_slice(text),
        Encoding::Identity8Bit => {
            for &b in text {
                if b == b'\n' {
                    out.push(b'\r');
                }
                out.push(b);
            }
        }
        Encoding::Utf8 | Encoding::Utf16Le | Encoding::Utf16Be => {
            let units: Vec<u16> = text.iter().map(|&b| u16::from(b)).collect();
            encode_wide(encoding, &units, out);
        }
    }
}

/// Appends the bytes for the UTF-16 code units `text` to `out`.
pub fn encode_wide(encoding: Encoding, text: &[u16], out: &mut Vec<u8>) {
    match encoding {
        Encoding::SystemText => {
            out.extend_from_slice(String::from_utf16_lossy(text).as_bytes());
        }
        Encoding::Identity8Bit => {
            for unit in with_crlf(text) {
                out.push(u8::try_from(unit).unwrap_or(PLACEHOLDER));
            }
        }
        Encoding::Utf8 => {
            let mut scratch = [0u8; 3];
            for c in char::decode_utf16(with_crlf(text)) {
                match c {
                    Ok(c) if c.len_utf8() <= 3 => {
                        out.extend_from_slice(c.encode_utf8(&mut scratch).as_bytes());
                    }
                    // Needs a fourth byte, or is an unpaired surrogate.
                    _ => out.push(PLACEHOLDER),
                }
            }
        }
        Encoding::Utf16Le => {
            for unit in with_crlf(text) {
                out.extend_from_slice(&unit.to_le_bytes());
            }
        }
        Encoding::Utf16Be => {
            for unit in with_crlf(text) {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
    }
}

/// Yields `text` with every `\n` preceded by `\r`.
fn with_crlf(text: &[u16]) -> impl Iterator<Item = u16> + '_ {
    const LF: u16 = 0x000A;
    const CR: u16 = 0x000D;
    text.iter().flat_map(|&u| {
        let cr = (u == LF).then_some(CR);
        cr.into_iter().chain(core::iter::once(u))
    })
}

//! Per-encoding line decoding over a byte window.
//!
//! Each decoder is a pure step function: given the unread bytes of the window
//! it appends characters to a [`LineBuffer`] until it finds `\n`, runs out of
//! complete units, or meets an invalid sequence, and reports how many bytes it
//! consumed. Refilling the window and deciding end-of-stream is the caller's
//! job, which keeps the decoders testable on plain slices.
//!
//! Shared rules:
//! - `\n` ends a line and is consumed but not emitted.
//! - every `\r` is dropped.
//! - a unit split across the window edge is left unconsumed.

mod identity;
mod text;
mod utf16;
mod utf8;

use bstr::BString;

use crate::{
    Encoding,
    wide::{PLACEHOLDER, WideString},
};

pub(crate) use text::push_platform_line;

/// Why a decode step stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A `\n` was consumed; the line is complete.
    LineEnd,
    /// The buffered bytes are used up (possibly leaving a partial unit).
    Exhausted,
    /// A malformed sequence was found. Only UTF-8 produces this.
    Invalid,
}

/// Result of one decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Bytes consumed from the front of the input slice.
    pub consumed: usize,
    /// Characters appended to the line.
    pub produced: usize,
    /// Why the step stopped.
    pub outcome: Outcome,
}

/// Destination for decoded characters.
///
/// The narrow implementation ([`BString`]) stores characters up to 0xFF as a
/// byte and anything larger as [`PLACEHOLDER`]. The wide implementation
/// ([`WideString`]) stores UTF-16 code units.
pub trait LineBuffer {
    /// Whether 4-byte UTF-8 sequences (code points above U+FFFF) decode.
    const SUPPLEMENTARY: bool;

    /// Appends a character whose value is a single byte.
    fn push_byte(&mut self, byte: u8);

    /// Appends a UTF-16 code unit.
    fn push_unit(&mut self, unit: u16);

    /// Appends a Unicode scalar decoded from UTF-8.
    fn push_code_point(&mut self, cp: u32);

    /// Appends one line read through the platform text path.
    fn push_platform(&mut self, bytes: &[u8]);

    /// Discards the partial line.
    fn clear_line(&mut self);
}

impl LineBuffer for BString {
    const SUPPLEMENTARY: bool = false;

    fn push_byte(&mut self, byte: u8) {
        self.push(byte);
    }

    fn push_unit(&mut self, unit: u16) {
        self.push(u8::try_from(unit).unwrap_or(PLACEHOLDER));
    }

    fn push_code_point(&mut self, cp: u32) {
        // Latin-1 range keeps its byte value; only larger code points become `?`.
        self.push(u8::try_from(cp).unwrap_or(PLACEHOLDER));
    }

    fn push_platform(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn clear_line(&mut self) {
        self.clear();
    }
}

impl LineBuffer for WideString {
    const SUPPLEMENTARY: bool = true;

    fn push_byte(&mut self, byte: u8) {
        self.push(u16::from(byte));
    }

    fn push_unit(&mut self, unit: u16) {
        self.push(unit);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_code_point(&mut self, cp: u32) {
        if let Ok(unit) = u16::try_from(cp) {
            self.push(unit);
        } else {
            let v = cp - 0x1_0000;
            self.push(0xD800 | ((v >> 10) & 0x3FF) as u16);
            self.push(0xDC00 | (v & 0x3FF) as u16);
        }
    }

    fn push_platform(&mut self, bytes: &[u8]) {
        self.push_str(&String::from_utf8_lossy(bytes));
    }

    fn clear_line(&mut self) {
        self.clear();
    }
}

/// Runs one decode step of `encoding` over `input`.
///
/// `at_eof` tells the UTF-8 decoder that no more bytes will follow `input`,
/// turning an incomplete trailing sequence into [`Outcome::Invalid`].
///
/// Only called for encodings where [`Encoding::is_buffered`] holds;
/// [`Encoding::SystemText`] is read through the platform path instead.
pub fn step<L: LineBuffer>(encoding: Encoding, input: &[u8], at_eof: bool, out: &mut L) -> Step {
    match encoding {
        Encoding::Identity8Bit => identity::step(input, out),
        Encoding::Utf8 => utf8::step(input, at_eof, out),
        Encoding::Utf16Le => utf16::step(input, u16::from_le_bytes, out),
        Encoding::Utf16Be => utf16::step(input, u16::from_be_bytes, out),
        Encoding::SystemText => unreachable!("system text is read through the platform path"),
    }
}

use super::{LineBuffer, Outcome, Step};
use crate::wide::PLACEHOLDER;

/// Sequence length and payload bits of a lead byte, or `None` when the byte
/// cannot start a sequence.
///
/// 4-byte leads are only accepted when the output can hold code points above
/// U+FFFF.
fn lead(b: u8, supplementary: bool) -> Option<(usize, u32)> {
    match b {
        0x00..=0x7F => Some((1, u32::from(b))),
        0xC0..=0xDF => Some((2, u32::from(b & 0x1F))),
        0xE0..=0xEF => Some((3, u32::from(b & 0x0F))),
        0xF0..=0xF7 if supplementary => Some((4, u32::from(b & 0x07))),
        _ => None,
    }
}

fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Decodes UTF-8 until `\n`, the end of complete input, or a malformed
/// sequence.
///
/// A sequence cut off by the end of `input` is left unconsumed unless
/// `at_eof` is set, in which case it is malformed. On a malformed sequence the
/// offending byte is consumed and [`PLACEHOLDER`] is appended.
pub(super) fn step<L: LineBuffer>(input: &[u8], at_eof: bool, out: &mut L) -> Step {
    let mut i = 0;
    let mut produced = 0;

    let invalid = |i: usize, produced: usize, out: &mut L| {
        out.push_byte(PLACEHOLDER);
        Step {
            consumed: i + 1,
            produced: produced + 1,
            outcome: Outcome::Invalid,
        }
    };

    while i < input.len() {
        let b = input[i];
        match b {
            b'\n' => {
                return Step {
                    consumed: i + 1,
                    produced,
                    outcome: Outcome::LineEnd,
                };
            }
            b'\r' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let Some((len, bits)) = lead(b, L::SUPPLEMENTARY) else {
            return invalid(i, produced, out);
        };

        if i + len > input.len() {
            if at_eof {
                return invalid(i, produced, out);
            }
            break;
        }

        let tail = &input[i + 1..i + len];
        if !tail.iter().copied().all(is_continuation) {
            return invalid(i, produced, out);
        }

        let cp = tail
            .iter()
            .fold(bits, |acc, &c| (acc << 6) | u32::from(c & 0x3F));
        out.push_code_point(cp);
        produced += 1;
        i += len;
    }

    Step {
        consumed: i,
        produced,
        outcome: Outcome::Exhausted,
    }
}

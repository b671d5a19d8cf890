use super::{LineBuffer, Outcome, Step};

const LF: u16 = 0x000A;
const CR: u16 = 0x000D;

/// Two bytes per unit; `unit` fixes the byte order. Surrogates pass through
/// unpaired.
pub(super) fn step<L: LineBuffer>(input: &[u8], unit: fn([u8; 2]) -> u16, out: &mut L) -> Step {
    let mut produced = 0;
    let mut consumed = 0;
    for pair in input.chunks_exact(2) {
        let u = unit([pair[0], pair[1]]);
        consumed += 2;
        match u {
            LF => {
                return Step {
                    consumed,
                    produced,
                    outcome: Outcome::LineEnd,
                };
            }
            CR => {}
            _ => {
                out.push_unit(u);
                produced += 1;
            }
        }
    }
    Step {
        consumed,
        produced,
        outcome: Outcome::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use bstr::{BString, ByteSlice};

    use super::*;
    use crate::WideString;

    #[test]
    fn little_endian_units() {
        let mut line = WideString::new();
        let s = step(
            &[b'h', 0, b'i', 0, 0xAC, 0x20],
            u16::from_le_bytes,
            &mut line,
        );
        assert_eq!(s.outcome, Outcome::Exhausted);
        assert_eq!(s.consumed, 6);
        assert_eq!(line, "hi€");
    }

    #[test]
    fn big_endian_units_and_crlf() {
        let mut line = WideString::new();
        let s = step(
            &[0, b'a', 0, b'\r', 0, b'\n', 0, b'b'],
            u16::from_be_bytes,
            &mut line,
        );
        assert_eq!(
            s,
            Step {
                consumed: 6,
                produced: 1,
                outcome: Outcome::LineEnd
            }
        );
        assert_eq!(line, "a");
    }

    #[test]
    fn odd_trailing_byte_is_left_unread() {
        let mut line = WideString::new();
        let s = step(&[b'h', 0, b'i'], u16::from_le_bytes, &mut line);
        assert_eq!(s.consumed, 2);
        assert_eq!(line, "h");
    }

    #[test]
    fn narrow_output_uses_placeholder_above_latin1() {
        let mut line = BString::default();
        step(&[0x00, 0xE9, 0x20, 0xAC], u16::from_be_bytes, &mut line);
        assert_eq!(line.as_bstr(), b"\xE9?".as_bstr());
    }

    #[test]
    fn surrogates_pass_through() {
        let mut line = WideString::new();
        step(&[0x3D, 0xD8, 0x00, 0xDE], u16::from_le_bytes, &mut line);
        assert_eq!(line, "😀");
    }
}

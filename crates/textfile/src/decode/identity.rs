use super::{LineBuffer, Outcome, Step};

/// One byte, one character.
pub(super) fn step<L: LineBuffer>(input: &[u8], out: &mut L) -> Step {
    let mut produced = 0;
    for (i, &b) in input.iter().enumerate() {
        match b {
            b'\n' => {
                return Step {
                    consumed: i + 1,
                    produced,
                    outcome: Outcome::LineEnd,
                };
            }
            b'\r' => {}
            _ => {
                out.push_byte(b);
                produced += 1;
            }
        }
    }
    Step {
        consumed: input.len(),
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
    fn stops_after_newline() {
        let mut line = BString::default();
        let s = step(b"ab\r\ncd", &mut line);
        assert_eq!(
            s,
            Step {
                consumed: 4,
                produced: 2,
                outcome: Outcome::LineEnd
            }
        );
        assert_eq!(line.as_bstr(), b"ab".as_bstr());
    }

    #[test]
    fn high_bytes_map_to_same_value() {
        let mut line = WideString::new();
        let s = step(b"\xE9\xFF", &mut line);
        assert_eq!(s.outcome, Outcome::Exhausted);
        assert_eq!(s.consumed, 2);
        assert_eq!(line.as_units(), &[0xE9, 0xFF]);
    }

    #[test]
    fn bare_carriage_return_is_dropped() {
        let mut line = BString::default();
        step(b"a\rb", &mut line);
        assert_eq!(line.as_bstr(), b"ab".as_bstr());
    }
}

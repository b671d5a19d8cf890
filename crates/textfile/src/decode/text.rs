use super::LineBuffer;

/// Appends a raw line from the platform text path, minus its `\n` terminator
/// and every `\r`.
///
/// Returns the number of characters the line contributed before platform
/// decoding, which the caller only compares against zero.
pub(crate) fn push_platform_line<L: LineBuffer>(raw: &[u8], out: &mut L) -> usize {
    let body = raw.strip_suffix(b"\n").unwrap_or(raw);
    if body.contains(&b'\r') {
        let kept: Vec<u8> = body.iter().copied().filter(|&b| b != b'\r').collect();
        out.push_platform(&kept);
        kept.len()
    } else {
        out.push_platform(body);
        body.len()
    }
}

#[cfg(test)]
mod tests {
    use bstr::{BString, ByteSlice};

    use super::*;

    #[test]
    fn strips_terminator_and_carriage_returns() {
        let mut line = BString::default();
        assert_eq!(push_platform_line(b"a\rb\r\n", &mut line), 2);
        assert_eq!(line.as_bstr(), b"ab".as_bstr());
    }

    #[test]
    fn keeps_embedded_nul() {
        let mut line = BString::default();
        push_platform_line(b"a\0b\n", &mut line);
        assert_eq!(line.as_bstr(), b"a\0b".as_bstr());
    }

    #[test]
    fn unterminated_tail_is_a_line() {
        let mut line = BString::default();
        assert_eq!(push_platform_line(b"tail", &mut line), 4);
        assert_eq!(line.as_bstr(), b"tail".as_bstr());
    }
}

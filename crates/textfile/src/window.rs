//! Fixed-capacity sliding window over a byte stream.
//!
//! The window holds `bytes[..valid]`, of which `bytes[..cursor]` have already
//! been handed to a decoder. Consumed bytes stay addressable until the next
//! [`Window::fill`] compacts them away, which is what lets a backward seek be
//! served without touching the stream.
//!
//! Invariant: `cursor <= valid <= capacity`.

use std::io::{self, ErrorKind, Read};

/// Window size used by [`TextFile`](crate::TextFile) unless configured
/// otherwise.
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Smallest accepted capacity; one complete UTF-8 sequence must always fit.
pub const MIN_CAPACITY: usize = 4;

/// Index-based read window with compaction and fill-on-demand.
#[derive(Debug)]
pub struct Window {
    bytes: Box<[u8]>,
    valid: usize,
    cursor: usize,
}

impl Window {
    /// Creates an empty window; `capacity` is raised to [`MIN_CAPACITY`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(MIN_CAPACITY)].into_boxed_slice(),
            valid: 0,
            cursor: 0,
        }
    }

    /// Total number of bytes the window can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Number of filled bytes, consumed or not.
    #[must_use]
    pub fn valid_len(&self) -> usize {
        self.valid
    }

    /// Index of the next unread byte.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }

    /// Returns `true` when every slot holds a filled byte.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.valid == self.bytes.len()
    }

    /// Bytes buffered but not yet consumed.
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.bytes[self.cursor..self.valid]
    }

    /// Length of [`Window::unread`].
    #[must_use]
    pub fn unread_len(&self) -> usize {
        self.valid - self.cursor
    }

    /// Marks `n` unread bytes as consumed.
    ///
    /// # Panics
    ///
    /// When `n` exceeds the unread length.
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.unread_len(), "consumed past the filled window");
        self.cursor += n;
    }

    /// Drops all buffered bytes.
    pub fn clear(&mut self) {
        self.valid = 0;
        self.cursor = 0;
    }

    /// Moves the cursor by `delta` bytes if the result stays inside the filled
    /// range `[0, valid)`.
    ///
    /// Returns `false`, leaving the window untouched, when the target is
    /// outside; the caller then has to discard the window and seek the stream.
    pub fn reposition(&mut self, delta: i64) -> bool {
        let Ok(cursor) = i64::try_from(self.cursor) else {
            return false;
        };
        match cursor.checked_add(delta).map(usize::try_from) {
            Some(Ok(target)) if target < self.valid => {
                self.cursor = target;
                true
            }
            _ => false,
        }
    }

    /// Compacts unread bytes to the front and appends as many bytes from
    /// `reader` as fit.
    ///
    /// Reads until the window is full or `reader` reports end of stream, so a
    /// window that is not full afterwards means the stream is exhausted.
    /// Returns `true` only when no new byte was obtained.
    ///
    /// # Errors
    ///
    /// Propagates read failures other than [`ErrorKind::Interrupted`]. Bytes
    /// read before the failure stay in the window.
    pub fn fill<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<bool> {
        if self.cursor < self.valid {
            self.bytes.copy_within(self.cursor..self.valid, 0);
            self.valid -= self.cursor;
        } else {
            self.valid = 0;
        }
        self.cursor = 0;

        let mut obtained = 0;
        while self.valid < self.bytes.len() {
            match reader.read(&mut self.bytes[self.valid..]) {
                Ok(0) => break,
                Ok(n) => {
                    self.valid += n;
                    obtained += n;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        let exhausted = obtained == 0;
        tracing::trace!(obtained, valid = self.valid, exhausted, "window fill");
        Ok(exhausted)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Reader that hands out at most `step` bytes per call.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn capacity_is_clamped_to_minimum() {
        assert_eq!(Window::with_capacity(0).capacity(), MIN_CAPACITY);
        assert_eq!(Window::default().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn fill_reads_until_full_then_reports_exhaustion() {
        let mut window = Window::with_capacity(8);
        let mut src = Cursor::new(b"0123456789".to_vec());

        assert!(!window.fill(&mut src).unwrap());
        assert!(window.is_full());
        assert_eq!(window.unread(), b"01234567");

        window.consume(6);
        assert!(!window.fill(&mut src).unwrap());
        assert_eq!(window.unread(), b"6789");
        assert!(!window.is_full());

        window.consume(4);
        assert!(window.fill(&mut src).unwrap());
        assert!(window.is_empty());
    }

    #[test]
    fn short_reads_still_fill_the_window() {
        let mut window = Window::with_capacity(6);
        let mut src = Trickle {
            data: b"abcdefgh",
            step: 1,
        };
        assert!(!window.fill(&mut src).unwrap());
        assert_eq!(window.unread(), b"abcdef");
    }

    #[test]
    fn compaction_keeps_unread_tail_in_order() {
        let mut window = Window::with_capacity(4);
        let mut src = Cursor::new(b"abcdefg".to_vec());
        window.fill(&mut src).unwrap();
        window.consume(3);
        window.fill(&mut src).unwrap();
        assert_eq!(window.cursor(), 0);
        assert_eq!(window.unread(), b"defg");
    }

    #[test]
    fn reposition_stays_inside_filled_range() {
        let mut window = Window::with_capacity(8);
        window.fill(&mut Cursor::new(b"abcdef".to_vec())).unwrap();
        window.consume(4);

        assert!(window.reposition(-4));
        assert_eq!(window.unread(), b"abcdef");
        assert!(window.reposition(5));
        assert_eq!(window.unread(), b"f");

        // One past the last filled byte is outside.
        assert!(!window.reposition(1));
        assert!(!window.reposition(-6));
        assert_eq!(window.cursor(), 5, "failed reposition must not move");
    }

    #[test]
    #[should_panic(expected = "consumed past the filled window")]
    fn consuming_past_valid_panics() {
        let mut window = Window::with_capacity(4);
        window.consume(1);
    }
}

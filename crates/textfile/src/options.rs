use crate::{Encoding, window::DEFAULT_CAPACITY};

/// Configuration for a [`TextFile`](crate::TextFile).
///
/// # Examples
///
/// ```rust
/// use textfile::{Encoding, TextFile, TextFileOptions};
///
/// let file = TextFile::new(TextFileOptions {
///     encoding: Encoding::Utf8,
///     ..Default::default()
/// });
/// assert_eq!(file.encoding(), Encoding::Utf8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFileOptions {
    /// Encoding assumed for streams without a byte order mark.
    ///
    /// A detected mark overrides it. When it is still
    /// [`Encoding::SystemText`] after detection, the stream is read through
    /// the platform text path.
    ///
    /// # Default
    ///
    /// [`Encoding::SystemText`]
    pub encoding: Encoding,

    /// Encoding switched to when UTF-8 decoding meets a malformed sequence.
    ///
    /// A value of [`Encoding::Utf8`] is treated as [`Encoding::SystemText`].
    ///
    /// # Default
    ///
    /// [`Encoding::SystemText`]
    pub default_encoding: Encoding,

    /// Size of the read window in bytes. Values below 4 are raised to 4.
    ///
    /// # Default
    ///
    /// 64 KiB
    pub buffer_capacity: usize,
}

impl Default for TextFileOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::SystemText,
            default_encoding: Encoding::SystemText,
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Limits for downloading a remote text resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchOptions {
    /// Bytes copied from an uncompressed body before the copy stops.
    ///
    /// The check happens between chunks, so up to `chunk_size - 1` extra bytes
    /// may land in the file.
    ///
    /// # Default
    ///
    /// 64 MiB
    pub max_size: u64,

    /// Largest reported length of a compressed body that is still accepted.
    ///
    /// # Default
    ///
    /// 10 MiB
    pub max_compressed_size: u64,

    /// Size of each read from an uncompressed body.
    ///
    /// # Default
    ///
    /// 1024
    pub chunk_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_size: 64 * 1024 * 1024,
            max_compressed_size: 10 * 1024 * 1024,
            chunk_size: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = TextFileOptions::default();
        assert_eq!(options.encoding, Encoding::SystemText);
        assert_eq!(options.buffer_capacity, 64 * 1024);
        assert_eq!(FetchOptions::default().max_compressed_size, 10 * 1024 * 1024);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_round_trip_through_json() {
        let options = TextFileOptions {
            encoding: Encoding::Utf16Be,
            default_encoding: Encoding::Identity8Bit,
            buffer_capacity: 128,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"encoding":"Utf16Be","default_encoding":"Identity8Bit","buffer_capacity":128}"#
        );
        assert_eq!(
            serde_json::from_str::<TextFileOptions>(&json).unwrap(),
            options
        );
    }
}

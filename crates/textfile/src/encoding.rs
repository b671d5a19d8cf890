use core::fmt;

/// How the bytes of a stream map to characters.
///
/// # Default
///
/// [`Encoding::SystemText`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Byte interpretation is left to the platform text path.
    ///
    /// Lines are split at `\n`, narrow lines are the raw bytes and wide lines
    /// are the UTF-8 (lossy) reading of those bytes.
    #[default]
    SystemText,
    /// Every byte is one character with the same value (0-255).
    Identity8Bit,
    /// UTF-8, optionally introduced by `EF BB BF`.
    Utf8,
    /// UTF-16 little endian, introduced by `FF FE`.
    Utf16Le,
    /// UTF-16 big endian, introduced by `FE FF`.
    Utf16Be,
}

impl Encoding {
    /// Returns `true` for the three Unicode transformation formats.
    #[must_use]
    pub const fn is_unicode(self) -> bool {
        matches!(self, Self::Utf8 | Self::Utf16Le | Self::Utf16Be)
    }

    /// The byte order mark written in front of saved content, if any.
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Self::SystemText | Self::Identity8Bit => &[],
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
        }
    }

    /// Whether reading goes through the byte window rather than the platform
    /// text path.
    #[must_use]
    pub(crate) const fn is_buffered(self) -> bool {
        !matches!(self, Self::SystemText)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SystemText => "system-text",
            Self::Identity8Bit => "identity-8bit",
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        })
    }
}

//! Decoded-code-unit strings and their conversions to and from raw bytes.
//!
//! Narrow lines are raw-byte strings ([`BString`]); wide lines are sequences of
//! UTF-16 code units ([`WideString`]). Nothing converts between the two
//! implicitly. Widening a byte string is lossless (each byte becomes the unit
//! with the same value); narrowing is either checked ([`WideStr::to_narrow`])
//! or substitutes [`PLACEHOLDER`] explicitly ([`WideStr::to_narrow_lossy`]).

use core::{borrow::Borrow, fmt, ops::Deref};
use std::string::FromUtf16Error;

use bstr::{BStr, BString};
use thiserror::Error;

/// Byte stored in a narrow line for a character above 0xFF, and written for
/// characters an encoder cannot represent.
pub const PLACEHOLDER: u8 = b'?';

/// A wide string held a code unit that does not fit in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("code unit {unit:#06x} at index {index} does not fit in a byte")]
pub struct NotNarrow {
    /// Position of the first offending unit.
    pub index: usize,
    /// The offending unit.
    pub unit: u16,
}

/// Borrowed sequence of UTF-16 code units.
///
/// Surrogates are carried as-is and need not be paired.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct WideStr([u16]);

impl WideStr {
    /// Views a unit slice as a wide string.
    #[must_use]
    pub fn new<S: AsRef<[u16]> + ?Sized>(units: &S) -> &Self {
        let units = units.as_ref();
        // SAFETY: `WideStr` is a `repr(transparent)` wrapper around `[u16]`,
        // so the pointer cast preserves layout and metadata.
        unsafe { &*(core::ptr::from_ref::<[u16]>(units) as *const Self) }
    }

    /// The underlying code units.
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    /// Number of code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no code units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Narrows to bytes, failing on the first unit above 0xFF.
    ///
    /// # Errors
    ///
    /// [`NotNarrow`] naming the first unit that does not fit.
    pub fn to_narrow(&self) -> Result<BString, NotNarrow> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, &unit)| u8::try_from(unit).map_err(|_| NotNarrow { index, unit }))
            .collect::<Result<Vec<u8>, _>>()
            .map(BString::from)
    }

    /// Narrows to bytes, storing [`PLACEHOLDER`] for every unit above 0xFF.
    #[must_use]
    pub fn to_narrow_lossy(&self) -> BString {
        self.0
            .iter()
            .map(|&unit| u8::try_from(unit).unwrap_or(PLACEHOLDER))
            .collect::<Vec<u8>>()
            .into()
    }

    /// Decodes to a `String`, replacing unpaired surrogates with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Copies into an owned [`WideString`].
    #[must_use]
    pub fn to_wide_string(&self) -> WideString {
        WideString(self.0.to_vec())
    }
}

impl fmt::Debug for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u16]> for WideStr {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

impl ToOwned for WideStr {
    type Owned = WideString;

    fn to_owned(&self) -> WideString {
        self.to_wide_string()
    }
}

impl PartialEq<str> for WideStr {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for WideStr {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

/// Owned sequence of UTF-16 code units.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WideString(Vec<u16>);

impl WideString {
    /// Creates an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Widens every byte to the code unit with the same value.
    #[must_use]
    pub fn from_latin1(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|&b| u16::from(b)).collect())
    }

    /// Wraps a vector of code units.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// Borrows as a [`WideStr`].
    #[must_use]
    pub fn as_wide_str(&self) -> &WideStr {
        WideStr::new(&self.0)
    }

    /// Appends one code unit.
    pub fn push(&mut self, unit: u16) {
        self.0.push(unit);
    }

    /// Appends the UTF-16 encoding of `s`.
    pub fn push_str(&mut self, s: &str) {
        self.0.extend(s.encode_utf16());
    }

    /// Removes every code unit.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the code units.
    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }
}

impl Deref for WideString {
    type Target = WideStr;

    fn deref(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl Borrow<WideStr> for WideString {
    fn borrow(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl AsRef<WideStr> for WideString {
    fn as_ref(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl AsRef<[u16]> for WideString {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Debug for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_wide_str(), f)
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_wide_str(), f)
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<&WideStr> for WideString {
    fn from(s: &WideStr) -> Self {
        s.to_wide_string()
    }
}

impl FromIterator<u16> for WideString {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<&WideStr> for String {
    type Error = FromUtf16Error;

    fn try_from(s: &WideStr) -> Result<Self, Self::Error> {
        String::from_utf16(s.as_units())
    }
}

impl TryFrom<WideString> for String {
    type Error = FromUtf16Error;

    fn try_from(s: WideString) -> Result<Self, Self::Error> {
        String::from_utf16(&s.0)
    }
}

impl PartialEq<str> for WideString {
    fn eq(&self, other: &str) -> bool {
        *self.as_wide_str() == *other
    }
}

impl PartialEq<&str> for WideString {
    fn eq(&self, other: &&str) -> bool {
        *self.as_wide_str() == **other
    }
}

/// Widens a raw-byte string one byte per unit. Never fails.
#[must_use]
pub fn widen(bytes: &BStr) -> WideString {
    WideString::from_latin1(bytes)
}

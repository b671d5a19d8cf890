use std::io::Write as _;

use bstr::BStr;

use super::TextFile;
use crate::{
    WideStr, encode,
    error::{Error, Result},
};

impl TextFile {
    /// Writes raw-byte text in the current encoding.
    ///
    /// Each byte is taken as the character with the same value, so UTF-8 and
    /// UTF-16 output widens it; `\n` becomes `\r\n` for every encoding except
    /// [`Encoding::SystemText`](crate::Encoding::SystemText).
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`], [`Error::NotWritable`], or [`Error::Io`].
    pub fn write_text(&mut self, text: &BStr) -> Result<()> {
        let mut bytes = Vec::with_capacity(text.len());
        encode::encode_narrow(self.encoding, text, &mut bytes);
        self.write_encoded(&bytes)
    }

    /// Writes UTF-16 text in the current encoding.
    ///
    /// # Errors
    ///
    /// As for [`TextFile::write_text`].
    pub fn write_text_wide(&mut self, text: &WideStr) -> Result<()> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        encode::encode_wide(self.encoding, text.as_units(), &mut bytes);
        self.write_encoded(&bytes)
    }

    /// Writes a Rust string in the current encoding, going through its UTF-16
    /// form.
    ///
    /// # Errors
    ///
    /// As for [`TextFile::write_text`].
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut bytes = Vec::with_capacity(text.len());
        encode::encode_wide(self.encoding, &units, &mut bytes);
        self.write_encoded(&bytes)
    }

    fn write_encoded(&mut self, bytes: &[u8]) -> Result<()> {
        let stream = self.stream_mut()?;
        if stream.mode().is_read() {
            return Err(Error::NotWritable);
        }
        stream.write_all(bytes)?;
        Ok(())
    }
}

//! Name record keys and decoded entries.

use std::fmt;

use read_fonts::tables::name::{Encoding, MacRomanMapping};

use crate::{Error, Result};

/// Identifies a single name record: `(nameID, platformID, encodingID, languageID)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name_id: u16,
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
}

impl RecordKey {
    pub const fn new(name_id: u16, platform_id: u16, encoding_id: u16, language_id: u16) -> Self {
        Self { name_id, platform_id, encoding_id, language_id }
    }

    /// Ordering required by the name table: platform, encoding, language, then nameID.
    pub(crate) fn table_order(&self) -> (u16, u16, u16, u16) {
        (self.platform_id, self.encoding_id, self.language_id, self.name_id)
    }

    fn encoding(&self) -> Encoding {
        Encoding::new(self.platform_id, self.encoding_id)
    }

    /// Whether strings under this platform/encoding pair can be decoded and re-encoded.
    pub fn is_supported(&self) -> bool {
        !matches!(self.encoding(), Encoding::Unknown)
    }

    /// Check that `value` can be stored under this record's declared encoding.
    pub fn check_encodable(&self, value: &str) -> Result<()> {
        self.encode(value).map(|_| ())
    }

    /// Encode `value` into the bytes stored for this record.
    pub fn encode(&self, value: &str) -> Result<Vec<u8>> {
        match self.encoding() {
            Encoding::Utf16Be => Ok(value.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Encoding::MacRoman => value
                .chars()
                .map(|ch| {
                    MacRomanMapping.encode(ch).ok_or_else(|| Error::Encoding {
                        name_id: self.name_id,
                        platform_id: self.platform_id,
                        encoding_id: self.encoding_id,
                        ch,
                    })
                })
                .collect(),
            Encoding::Unknown => Err(Error::UnsupportedEncoding {
                name_id: self.name_id,
                platform_id: self.platform_id,
                encoding_id: self.encoding_id,
            }),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nameID {} ({}, {}, {:#x})",
            self.name_id, self.platform_id, self.encoding_id, self.language_id
        )
    }
}

/// A name record loaded from the font: its text decoded, plus the stored bytes.
///
/// The bytes are written back verbatim unless the record is overwritten, so
/// records in encodings that cannot be decoded survive an edit unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    key: RecordKey,
    value: String,
    raw: Vec<u8>,
}

impl NameEntry {
    pub fn new(key: RecordKey, value: impl Into<String>, raw: Vec<u8>) -> Self {
        Self { key, value: value.into(), raw }
    }

    pub fn key(&self) -> RecordKey {
        self.key
    }

    pub fn name_id(&self) -> u16 {
        self.key.name_id
    }

    /// The decoded text. Empty for records with an unsupported encoding.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The string bytes as stored in the font.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub(crate) fn set(&mut self, value: &str, raw: Vec<u8>) {
        value.clone_into(&mut self.value);
        self.raw = raw;
    }
}

//! Raw `name` table bytes.
//!
//! Strings are carried exactly as stored, so records in encodings that cannot
//! be decoded are written back unchanged when other records are edited.

use std::collections::HashMap;

use log::debug;
use read_fonts::ReadError;

use crate::{Error, RecordKey, Result};

const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 12;
const LANG_TAG_RECORD_LEN: usize = 4;

/// The stored string bytes of a `name` table, in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawStrings {
    pub(crate) version: u16,
    pub(crate) records: Vec<Vec<u8>>,
    pub(crate) lang_tags: Vec<Vec<u8>>,
}

impl RawStrings {
    pub(crate) fn read(table: &[u8]) -> Result<Self> {
        let version = read_u16(table, 0)?;
        let count = read_u16(table, 2)? as usize;
        let storage = table.get(read_u16(table, 4)? as usize..).unwrap_or_default();

        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            let pos = HEADER_LEN + i * RECORD_LEN;
            let length = read_u16(table, pos + 8)?;
            let offset = read_u16(table, pos + 10)?;
            records.push(stored_bytes(storage, length, offset));
        }

        let mut lang_tags = Vec::new();
        if version >= 1 {
            let base = HEADER_LEN + count * RECORD_LEN;
            let tag_count = read_u16(table, base)? as usize;
            for i in 0..tag_count {
                let pos = base + 2 + i * LANG_TAG_RECORD_LEN;
                let length = read_u16(table, pos)?;
                let offset = read_u16(table, pos + 2)?;
                lang_tags.push(stored_bytes(storage, length, offset));
            }
        }

        Ok(Self { version, records, lang_tags })
    }
}

/// Serialize a `name` table. `records` must already be in table order.
///
/// Identical strings share one copy in storage. Version 1 is written when
/// there are language tags or the source table was version 1.
pub(crate) fn write_name_table(
    version: u16,
    records: &[(RecordKey, &[u8])],
    lang_tags: &[Vec<u8>],
) -> Result<Vec<u8>> {
    let version = if lang_tags.is_empty() { version.min(1) } else { 1 };
    let mut header_len = HEADER_LEN + records.len() * RECORD_LEN;
    if version >= 1 {
        header_len += 2 + lang_tags.len() * LANG_TAG_RECORD_LEN;
    }

    let mut storage = Storage::default();
    let mut out = Vec::with_capacity(header_len);
    out.extend(version.to_be_bytes());
    out.extend(to_u16(records.len())?.to_be_bytes());
    out.extend(to_u16(header_len)?.to_be_bytes());

    for (key, bytes) in records {
        let (length, offset) = storage.add(bytes)?;
        for field in
            [key.platform_id, key.encoding_id, key.language_id, key.name_id, length, offset]
        {
            out.extend(field.to_be_bytes());
        }
    }

    if version >= 1 {
        out.extend(to_u16(lang_tags.len())?.to_be_bytes());
        for tag in lang_tags {
            let (length, offset) = storage.add(tag)?;
            out.extend(length.to_be_bytes());
            out.extend(offset.to_be_bytes());
        }
    }

    out.extend(storage.data);
    Ok(out)
}

#[derive(Default)]
struct Storage<'a> {
    data: Vec<u8>,
    offsets: HashMap<&'a [u8], u16>,
}

impl<'a> Storage<'a> {
    /// Place `bytes` in storage and return its `(length, offset)`.
    fn add(&mut self, bytes: &'a [u8]) -> Result<(u16, u16)> {
        let length = to_u16(bytes.len())?;
        if let Some(&offset) = self.offsets.get(bytes) {
            return Ok((length, offset));
        }
        let offset = to_u16(self.data.len())?;
        self.data.extend_from_slice(bytes);
        self.offsets.insert(bytes, offset);
        Ok((length, offset))
    }
}

/// The bytes a string occupies; a range running past storage is cut short.
fn stored_bytes(storage: &[u8], length: u16, offset: u16) -> Vec<u8> {
    let start = offset as usize;
    let end = start + length as usize;
    match storage.get(start..end) {
        Some(bytes) => bytes.to_vec(),
        None => {
            let len = storage.len();
            debug!("string at {start}..{end} runs past name storage ({len} bytes)");
            storage[start.min(len)..end.min(len)].to_vec()
        }
    }
}

fn read_u16(data: &[u8], pos: usize) -> Result<u16> {
    data.get(pos..pos + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(Error::Read(ReadError::OutOfBounds))
}

fn to_u16(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| Error::StorageOverflow { size: n })
}

use std::{
    fs::{read, write},
    path::{Path, PathBuf},
};

use log::debug;
use read_fonts::{FontRef, ReadError, TableProvider, types::Tag};

use crate::{
    Error, NameEntry, RecordKey, Result, rewrite_font,
    table::{RawStrings, write_name_table},
};

const NAME: Tag = Tag::new(b"name");

/// An opened font whose name records can be read and overwritten in memory.
///
/// Records are decoded once when the handle is created. Edits stay in memory
/// until [`FontHandle::to_bytes`] or [`FontHandle::save`] serializes them.
#[derive(Debug, Clone)]
pub struct FontHandle {
    path: Option<PathBuf>,
    data: Vec<u8>,
    records: Vec<NameEntry>,
    version: u16,
    lang_tags: Vec<Vec<u8>>,
    modified: bool,
}

impl FontHandle {
    /// Load a font file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = read(path).map_err(|source| Error::Io { path: path.to_owned(), source })?;
        let mut handle = Self::from_data(data)?;
        handle.path = Some(path.to_owned());
        Ok(handle)
    }

    /// Load a font from raw bytes.
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        let (records, raw) = {
            let font = FontRef::new(&data)?;
            let name = match font.name() {
                Ok(name) => name,
                Err(ReadError::TableIsMissing(_)) => return Err(Error::MissingNameTable),
                Err(e) => return Err(e.into()),
            };
            let mut raw = match font.table_data(NAME) {
                Some(table) => RawStrings::read(table.as_ref())?,
                None => return Err(Error::MissingNameTable),
            };
            let string_data = name.string_data();

            let mut records = Vec::with_capacity(name.name_record().len());
            for (record, bytes) in name.name_record().iter().zip(raw.records.drain(..)) {
                let key = RecordKey::new(
                    record.name_id().to_u16(),
                    record.platform_id(),
                    record.encoding_id(),
                    record.language_id(),
                );
                let value = match record.string(string_data) {
                    Ok(s) => s.chars().collect::<String>(),
                    Err(e) => {
                        debug!("keeping undecodable {key} as stored bytes: {e}");
                        String::new()
                    }
                };
                records.push(NameEntry::new(key, value, bytes));
            }

            (records, raw)
        };

        Ok(Self {
            path: None,
            data,
            records,
            version: raw.version,
            lang_tags: raw.lang_tags,
            modified: false,
        })
    }

    /// The path this handle was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All name records, in table order.
    pub fn records(&self) -> &[NameEntry] {
        &self.records
    }

    /// Whether any record has been overwritten since the font was loaded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Look up a record by its exact key.
    pub fn get_name_record(&self, key: RecordKey) -> Option<&NameEntry> {
        self.records.iter().find(|entry| entry.key() == key)
    }

    /// Overwrite every record with `name_id`, on all platforms.
    ///
    /// Returns the number of records updated.
    pub fn set_name_record_string(&mut self, name_id: u16, value: &str) -> Result<usize> {
        self.set_name_records(&[name_id], value)
    }

    /// Overwrite every record whose nameID is in `name_ids`, on all platforms.
    ///
    /// Records are never created: absent nameIDs are skipped. The value is
    /// encoded for every targeted record before anything is changed, so on
    /// error no record has been touched.
    pub fn set_name_records(&mut self, name_ids: &[u16], value: &str) -> Result<usize> {
        let encoded = self
            .records
            .iter()
            .filter(|e| name_ids.contains(&e.name_id()))
            .map(|e| e.key().encode(value))
            .collect::<Result<Vec<_>>>()?;

        let targets = self.records.iter_mut().filter(|e| name_ids.contains(&e.name_id()));
        let updated = encoded.len();
        for (entry, raw) in targets.zip(encoded) {
            debug!("  {}: {:?} → {value:?}", entry.key(), entry.value());
            entry.set(value, raw);
        }

        if updated > 0 {
            self.modified = true;
        }
        Ok(updated)
    }

    /// Serialize the font.
    ///
    /// An unmodified handle returns the original bytes. Otherwise the name
    /// table is rewritten from the records' stored bytes, and all other
    /// tables are copied as-is.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if !self.modified {
            return Ok(self.data.clone());
        }

        let mut entries: Vec<&NameEntry> = self.records.iter().collect();
        entries.sort_by_key(|e| e.key().table_order());
        let records: Vec<(RecordKey, &[u8])> =
            entries.iter().map(|e| (e.key(), e.raw())).collect();
        let name = write_name_table(self.version, &records, &self.lang_tags)?;

        rewrite_font(&self.data, |_font, builder| {
            builder.add_raw(NAME, name);
            Ok(())
        })
    }

    /// Serialize the font and write it to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        write(path, data).map_err(|source| Error::Io { path: path.to_owned(), source })
    }

    /// Release the handle, discarding unsaved edits.
    pub fn close(self) {}
}

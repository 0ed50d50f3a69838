//! Name table access for OpenType/TrueType fonts.
//!
//! A [`FontHandle`] loads the name records of a font once, lets callers look
//! up and overwrite them in memory, and serializes the font back to bytes.
//! Every other table is carried through untouched.

mod error;
mod handle;
mod record;
mod table;

pub use error::{Error, Result};
pub use handle::FontHandle;
pub use record::{NameEntry, RecordKey};

use read_fonts::FontRef;
use write_fonts::FontBuilder;

/// Rewrite font data by applying a transformation function.
///
/// Copies all tables from the source font, then calls `f` to modify or add tables.
/// The function receives a reference to the source font and a mutable builder
/// that already contains all original tables.
pub fn rewrite_font(
    data: &[u8],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}

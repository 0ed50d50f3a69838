//! In-memory fonts for unit tests.

use read_fonts::types::NameId;
use write_fonts::{
    FontBuilder,
    tables::name::{Name, NameRecord},
};

use crate::config::PlatformVariant;

pub const WIN: PlatformVariant = crate::config::WINDOWS_ENGLISH;
pub const MAC: PlatformVariant = crate::config::MAC_ROMAN;

/// Build a font whose only table is `name`, holding the given records.
pub fn font_with_names(records: &[(u16, PlatformVariant, &str)]) -> Vec<u8> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|(name_id, v, _)| (v.platform_id, v.encoding_id, v.language_id, *name_id));
    let records = sorted
        .into_iter()
        .map(|(name_id, v, s)| {
            NameRecord::new(
                v.platform_id,
                v.encoding_id,
                v.language_id,
                NameId::new(name_id),
                s.to_string().into(),
            )
        })
        .collect();
    let mut builder = FontBuilder::new();
    builder.add_table(&Name::new(records)).unwrap();
    builder.build()
}

/// A font shaped like a typical static TrueType export.
pub fn static_font() -> Vec<u8> {
    font_with_names(&[
        (1, WIN, "Test Font"),
        (2, WIN, "Regular"),
        (4, WIN, "Test Font Regular"),
        (6, WIN, "TestFont-Regular"),
        (16, WIN, "Test Font"),
        (1, MAC, "Test Font"),
        (4, MAC, "Test Font Regular"),
        (6, MAC, "TestFont-Regular"),
        (18, MAC, "Test Font Regular"),
    ])
}

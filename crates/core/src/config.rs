//! Naming policy tables.
//!
//! nameIDs follow the OpenType `name` table definitions. The resolver in
//! [`crate::naming`] only consults these tables, so an alternate policy can be
//! passed in without touching the lookup algorithm.

use fontnemo_font_ops::RecordKey;

/// Legacy family name.
pub const NAME_ID_FAMILY: u16 = 1;
/// Full font name.
pub const NAME_ID_FULL_NAME: u16 = 4;
/// PostScript name.
pub const NAME_ID_POSTSCRIPT: u16 = 6;
/// Typographic family name.
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;
/// Compatible full name (Macintosh only).
pub const NAME_ID_COMPATIBLE_FULL: u16 = 18;
/// PostScript CID findfont name.
pub const NAME_ID_POSTSCRIPT_CID: u16 = 20;
/// WWS family name.
pub const NAME_ID_WWS_FAMILY: u16 = 21;
/// Variations PostScript name prefix.
pub const NAME_ID_VARIATIONS_PS_PREFIX: u16 = 25;

/// Prefix of temporary files created next to the output while saving.
pub const TEMP_FILE_PREFIX: &str = ".fontnemo_tmp_";

/// Separator between a file stem and its timestamp token.
pub const TIMESTAMP_SEPARATOR: &str = "--";

/// Separator placed before the token by the `timestamp` edit.
pub const DEFAULT_FAMILY_TIMESTAMP_SEPARATOR: &str = " tX";

/// A platform/encoding/language triple checked during lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformVariant {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
}

impl PlatformVariant {
    pub const fn new(platform_id: u16, encoding_id: u16, language_id: u16) -> Self {
        Self { platform_id, encoding_id, language_id }
    }

    /// The record key for `name_id` under this variant.
    pub const fn key(&self, name_id: u16) -> RecordKey {
        RecordKey::new(name_id, self.platform_id, self.encoding_id, self.language_id)
    }
}

/// Windows, Unicode BMP, English (United States).
pub const WINDOWS_ENGLISH: PlatformVariant = PlatformVariant::new(3, 1, 0x409);

/// Macintosh, Roman, English.
pub const MAC_ROMAN: PlatformVariant = PlatformVariant::new(1, 0, 0);

/// Platforms searched for each candidate nameID, most preferred first.
pub const PLATFORM_PREFERENCE: &[PlatformVariant] = &[WINDOWS_ENGLISH, MAC_ROMAN];

/// How one logical naming concept maps onto name records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingPolicy {
    /// Human-readable concept name, used in logs and errors.
    pub concept: &'static str,
    /// Candidate nameIDs for reads, most specific first.
    pub read_priority: &'static [u16],
    /// Platforms searched for each candidate, most preferred first.
    pub platforms: &'static [PlatformVariant],
    /// Every nameID overwritten on write.
    pub write_targets: &'static [u16],
    /// Remove spaces from values before writing.
    pub strip_spaces: bool,
}

/// The human-facing family name.
pub const FAMILY_NAME: NamingPolicy = NamingPolicy {
    concept: "family name",
    read_priority: &[NAME_ID_TYPOGRAPHIC_FAMILY, NAME_ID_WWS_FAMILY, NAME_ID_FAMILY],
    platforms: PLATFORM_PREFERENCE,
    write_targets: &[
        NAME_ID_FAMILY,
        NAME_ID_FULL_NAME,
        NAME_ID_TYPOGRAPHIC_FAMILY,
        NAME_ID_COMPATIBLE_FULL,
        NAME_ID_WWS_FAMILY,
    ],
    strip_spaces: false,
};

/// The PostScript-safe family identifier.
pub const FAMILY_SLUG: NamingPolicy = NamingPolicy {
    concept: "family slug",
    read_priority: &[NAME_ID_VARIATIONS_PS_PREFIX, NAME_ID_POSTSCRIPT],
    platforms: PLATFORM_PREFERENCE,
    write_targets: &[NAME_ID_POSTSCRIPT, NAME_ID_POSTSCRIPT_CID, NAME_ID_VARIATIONS_PS_PREFIX],
    strip_spaces: true,
};

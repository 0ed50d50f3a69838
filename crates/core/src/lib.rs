//! Core of fontnemo: edit the family name of OpenType/TrueType fonts.
//!
//! - [`naming`] resolves the family name and slug across redundant name
//!   records and broadcasts edits back to all of them.
//! - [`persist`] saves edited fonts without ever leaving a partial file.
//! - [`slug`] generates PostScript-safe slugs and timestamp tokens.
//! - [`edit`] ties these together into the user-facing family edits.

pub mod config;
pub mod edit;
mod error;
pub mod naming;
pub mod persist;
pub mod slug;

#[cfg(test)]
mod test_fonts;

pub use edit::{EditOutcome, FamilyEdit, FamilyNames, edit_family, view_family};
pub use error::{Error, Result};
pub use fontnemo_font_ops::FontHandle;
pub use naming::{
    NameResolver, read_family_name, read_family_slug, write_family_name, write_family_slug,
};
pub use persist::{OutputMode, persist};
pub use slug::{make_slug, make_timestamp};

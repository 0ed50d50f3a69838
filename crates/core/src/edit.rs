//! Family name edits: open, transform, write, save, verify.

use std::path::{Path, PathBuf};

use fontnemo_font_ops::FontHandle;
use log::info;

use crate::{
    Result,
    config::DEFAULT_FAMILY_TIMESTAMP_SEPARATOR,
    naming::{read_family_name, read_family_slug, write_family_name, write_family_slug},
    persist::{OutputMode, persist},
    slug::{make_slug, make_timestamp},
};

/// The two family concepts edited together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyNames {
    /// Display family name.
    pub name: String,
    /// PostScript-safe family identifier.
    pub slug: String,
}

impl FamilyNames {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self { name: name.into(), slug: slug.into() }
    }

    /// A fresh family whose slug is derived from `name`.
    pub fn from_family(name: &str) -> Self {
        Self::new(name, make_slug(name))
    }

    pub fn read(font: &FontHandle) -> Result<Self> {
        Ok(Self::new(read_family_name(font)?, read_family_slug(font)?))
    }

    /// Write both concepts. Returns what was stored, with the slug normalized.
    pub fn write(&self, font: &mut FontHandle) -> Result<Self> {
        let name = write_family_name(font, &self.name)?;
        let slug = write_family_slug(font, &self.slug)?;
        Ok(Self { name, slug })
    }
}

/// A change to a font's family name and slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyEdit {
    /// Replace the family entirely.
    New(String),
    /// Replace every occurrence of `find`.
    Replace { find: String, replace: String },
    /// Append text.
    Suffix(String),
    /// Prepend text.
    Prefix(String),
    /// Append `separator` and the current timestamp token.
    ///
    /// With `replace_existing` and the default separator, a previous stamp is
    /// removed first.
    Timestamp { separator: String, replace_existing: bool },
}

impl FamilyEdit {
    /// A timestamp edit with the default ` tX` separator, replacing old stamps.
    pub fn timestamp() -> Self {
        FamilyEdit::Timestamp {
            separator: DEFAULT_FAMILY_TIMESTAMP_SEPARATOR.to_string(),
            replace_existing: true,
        }
    }

    /// Whether the edit depends on the font's current names.
    pub fn reads_current(&self) -> bool {
        !matches!(self, FamilyEdit::New(_))
    }

    /// Compute the new names from `current`, using a fresh timestamp token.
    pub fn transform(&self, current: FamilyNames) -> FamilyNames {
        self.transform_with_token(current, &make_timestamp())
    }

    /// Compute the new names from `current`. `token` is only used by
    /// [`FamilyEdit::Timestamp`].
    pub fn transform_with_token(&self, current: FamilyNames, token: &str) -> FamilyNames {
        let FamilyNames { name, slug } = current;
        match self {
            FamilyEdit::New(family) => FamilyNames::from_family(family),
            FamilyEdit::Replace { find, replace } => {
                let find_slug = make_slug(find);
                let slug = if find_slug.is_empty() {
                    slug
                } else {
                    slug.replace(&find_slug, &make_slug(replace))
                };
                let name = if find.is_empty() { name } else { name.replace(find, replace) };
                FamilyNames { name, slug }
            }
            FamilyEdit::Suffix(suffix) => {
                FamilyNames { name: name + suffix, slug: slug + &make_slug(suffix) }
            }
            FamilyEdit::Prefix(prefix) => {
                FamilyNames { name: format!("{prefix}{name}"), slug: make_slug(prefix) + &slug }
            }
            FamilyEdit::Timestamp { separator, replace_existing } => {
                let (name, slug) = if *replace_existing
                    && separator == DEFAULT_FAMILY_TIMESTAMP_SEPARATOR
                {
                    let slug_marker = make_slug(DEFAULT_FAMILY_TIMESTAMP_SEPARATOR);
                    (
                        strip_from(&name, DEFAULT_FAMILY_TIMESTAMP_SEPARATOR),
                        strip_from(&slug, &slug_marker),
                    )
                } else {
                    (name.as_str(), slug.as_str())
                };
                let stamp = format!("{separator}{token}");
                FamilyNames {
                    name: format!("{name}{stamp}"),
                    slug: format!("{slug}{}", make_slug(&stamp)),
                }
            }
        }
    }

    /// Apply the edit to an open font's in-memory records.
    pub fn apply(&self, font: &mut FontHandle) -> Result<FamilyNames> {
        let updated = if self.reads_current() {
            let current = FamilyNames::read(font)?;
            let updated = self.transform(current.clone());
            info!("family_name: {:?} → {:?}", current.name, updated.name);
            info!("family_slug: {:?} → {:?}", current.slug, updated.slug);
            updated
        } else {
            let updated = self.transform_with_token(FamilyNames::new("", ""), "");
            info!("Setting family_name: {:?}", updated.name);
            info!("Setting family_slug: {:?}", updated.slug);
            updated
        };
        updated.write(font)
    }
}

/// Text before the first occurrence of `marker`, or all of `text`.
fn strip_from<'a>(text: &'a str, marker: &str) -> &'a str {
    text.split_once(marker).map_or(text, |(head, _)| head)
}

/// Result of an edit saved to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Where the edited font was written.
    pub path: PathBuf,
    /// Family name read back from the written file.
    pub family_name: String,
}

/// Read the family name of the font at `path`.
pub fn view_family(path: &Path) -> Result<String> {
    let font = FontHandle::open(path)?;
    let family = read_family_name(&font)?;
    font.close();
    Ok(family)
}

/// Edit the font at `input`, save it per `mode`, and read the result back.
pub fn edit_family(input: &Path, edit: &FamilyEdit, mode: &OutputMode) -> Result<EditOutcome> {
    let mut font = FontHandle::open(input)?;
    edit.apply(&mut font)?;
    let path = persist(&font, input, mode)?;
    font.close();

    let family_name = view_family(&path)?;
    Ok(EditOutcome { path, family_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fonts::{MAC, WIN, font_with_names, static_font};

    fn names(name: &str, slug: &str) -> FamilyNames {
        FamilyNames::new(name, slug)
    }

    #[test]
    fn test_new() {
        let edit = FamilyEdit::New("My Font [2024]".into());
        assert!(!edit.reads_current());
        assert_eq!(
            edit.transform_with_token(names("Old", "Old"), "tok"),
            names("My Font [2024]", "MyFont2024")
        );
    }

    #[test]
    fn test_replace() {
        let edit = FamilyEdit::Replace { find: "Test".into(), replace: "Prod Build".into() };
        assert_eq!(
            edit.transform_with_token(names("Test Font Test", "TestFont"), ""),
            names("Prod Build Font Prod Build", "ProdBuildFont")
        );
    }

    #[test]
    fn test_replace_with_empty_slug_find() {
        let edit = FamilyEdit::Replace { find: " ".into(), replace: "_".into() };
        assert_eq!(
            edit.transform_with_token(names("A B", "AB"), ""),
            names("A_B", "AB")
        );
    }

    #[test]
    fn test_suffix_and_prefix() {
        let suffix = FamilyEdit::Suffix(" Beta (2)".into());
        assert_eq!(
            suffix.transform_with_token(names("Font", "Font"), ""),
            names("Font Beta (2)", "FontBeta2")
        );

        let prefix = FamilyEdit::Prefix("Draft ".into());
        assert_eq!(
            prefix.transform_with_token(names("Font", "Font"), ""),
            names("Draft Font", "DraftFont")
        );
    }

    #[test]
    fn test_timestamp_appends() {
        let edit = FamilyEdit::timestamp();
        assert_eq!(
            edit.transform_with_token(names("Font", "Font"), "sabc12"),
            names("Font tXsabc12", "FonttXsabc12")
        );
    }

    #[test]
    fn test_timestamp_replaces_previous_stamp() {
        let edit = FamilyEdit::timestamp();
        assert_eq!(
            edit.transform_with_token(names("Font tXold1", "FonttXold1"), "new2"),
            names("Font tXnew2", "FonttXnew2")
        );
    }

    #[test]
    fn test_timestamp_keeps_previous_stamp() {
        let edit = FamilyEdit::Timestamp { separator: " tX".into(), replace_existing: false };
        assert_eq!(
            edit.transform_with_token(names("Font tXold1", "FonttXold1"), "new2"),
            names("Font tXold1 tXnew2", "FonttXold1tXnew2")
        );
    }

    #[test]
    fn test_timestamp_custom_separator_never_strips() {
        let edit = FamilyEdit::Timestamp { separator: "-".into(), replace_existing: true };
        assert_eq!(
            edit.transform_with_token(names("Font tXold", "FonttXold"), "n"),
            names("Font tXold-n", "FonttXold-n")
        );
    }

    #[test]
    fn test_apply_writes_both_concepts() {
        let mut font = FontHandle::from_data(static_font()).unwrap();
        let written = FamilyEdit::Suffix(" Pro".into()).apply(&mut font).unwrap();
        assert_eq!(written, names("Test Font Pro", "TestFontPro"));
        assert_eq!(FamilyNames::read(&font).unwrap(), written);
        assert_eq!(font.get_name_record(MAC.key(6)).unwrap().value(), "TestFontPro");
    }

    #[test]
    fn test_new_does_not_need_existing_names() {
        let mut font = FontHandle::from_data(font_with_names(&[(4, WIN, "Full")])).unwrap();
        FamilyEdit::New("Fresh".into()).apply(&mut font).unwrap();
        assert_eq!(font.get_name_record(WIN.key(4)).unwrap().value(), "Fresh");
    }

    #[test]
    fn test_suffix_requires_existing_names() {
        let mut font = FontHandle::from_data(font_with_names(&[(4, WIN, "Full")])).unwrap();
        let err = FamilyEdit::Suffix("X".into()).apply(&mut font).unwrap_err();
        assert!(matches!(err, crate::Error::NotFound { .. }));
        assert!(!font.is_modified());
    }
}

//! Priority-fallback reads and broadcast writes of logical naming concepts.
//!
//! A concept such as the family name is stored redundantly across several
//! nameIDs and platforms. Reads walk the policy's candidate nameIDs in order
//! and, for each, search the preferred platforms; the first record found wins.
//! Writes overwrite every existing record whose nameID is a target, whatever
//! its platform.

use fontnemo_font_ops::FontHandle;
use log::debug;

use crate::{
    Error, Result,
    config::{FAMILY_NAME, FAMILY_SLUG, NAME_ID_POSTSCRIPT, NamingPolicy},
};

/// Reads and writes one concept according to a [`NamingPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    policy: &'a NamingPolicy,
}

impl<'a> NameResolver<'a> {
    pub const fn new(policy: &'a NamingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &'a NamingPolicy {
        self.policy
    }

    /// Resolve the concept's current value.
    ///
    /// A PostScript name (nameID 6) is cut at its first hyphen, since legacy
    /// PostScript names join family and subfamily with one.
    pub fn read(&self, font: &FontHandle) -> Result<String> {
        let policy = self.policy;
        for &name_id in policy.read_priority {
            for variant in policy.platforms {
                let Some(entry) = font.get_name_record(variant.key(name_id)) else {
                    continue;
                };
                let value = entry.value();
                let value = if name_id == NAME_ID_POSTSCRIPT {
                    value.split_once('-').map_or(value, |(family, _)| family)
                } else {
                    value
                };
                debug!("Read {} from {}: {value:?}", policy.concept, entry.key());
                return Ok(value.to_owned());
            }
        }

        Err(Error::NotFound { concept: policy.concept, searched: policy.read_priority.to_vec() })
    }

    /// Overwrite every record targeted by the policy with `value`.
    ///
    /// Returns the value actually stored, after normalization.
    pub fn write(&self, font: &mut FontHandle, value: &str) -> Result<String> {
        let policy = self.policy;
        let value = if policy.strip_spaces { value.replace(' ', "") } else { value.to_owned() };

        debug!("Writing {} {value:?} to nameIDs {:?}", policy.concept, policy.write_targets);
        let updated = font.set_name_records(policy.write_targets, &value)?;
        debug!("Updated {updated} records");

        Ok(value)
    }
}

/// Resolver for the display family name: nameID 16 → 21 → 1.
pub const fn family_name() -> NameResolver<'static> {
    NameResolver::new(&FAMILY_NAME)
}

/// Resolver for the PostScript family slug: nameID 25 → 6.
pub const fn family_slug() -> NameResolver<'static> {
    NameResolver::new(&FAMILY_SLUG)
}

pub fn read_family_name(font: &FontHandle) -> Result<String> {
    family_name().read(font)
}

pub fn read_family_slug(font: &FontHandle) -> Result<String> {
    family_slug().read(font)
}

pub fn write_family_name(font: &mut FontHandle, value: &str) -> Result<String> {
    family_name().write(font, value)
}

/// Write the family slug. Spaces are removed first.
pub fn write_family_slug(font: &mut FontHandle, value: &str) -> Result<String> {
    family_slug().write(font, value)
}

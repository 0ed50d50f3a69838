//! Error types for font loading, name record editing and serialization.

use std::{io, path::PathBuf, result};

use read_fonts::ReadError;

/// Errors raised by [`FontHandle`](crate::FontHandle) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Read(#[from] ReadError),

    #[error("no name table in font")]
    MissingNameTable,

    #[error(
        "char {ch:?} is not representable in nameID {name_id} \
         (platform {platform_id}, encoding {encoding_id})"
    )]
    Encoding { name_id: u16, platform_id: u16, encoding_id: u16, ch: char },

    #[error(
        "nameID {name_id} uses an unsupported encoding \
         (platform {platform_id}, encoding {encoding_id})"
    )]
    UnsupportedEncoding { name_id: u16, platform_id: u16, encoding_id: u16 },

    #[error("name table string storage too large ({size} bytes)")]
    StorageOverflow { size: usize },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether this error comes from record text that cannot be encoded or decoded.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding { .. } | Error::UnsupportedEncoding { .. })
    }
}

pub type Result<T> = result::Result<T, Error>;

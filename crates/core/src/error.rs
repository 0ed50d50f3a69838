//! Error types for family name editing.

use std::{error, path::PathBuf, result};

use fontnemo_font_ops as font_ops;

/// Errors that can occur while reading, editing or saving family names.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no {concept} found in nameIDs {searched:?}")]
    NotFound { concept: &'static str, searched: Vec<u16> },

    #[error("encoding error: {0}")]
    Encoding(#[source] font_ops::Error),

    #[error(transparent)]
    Font(font_ops::Error),

    #[error("failed to save font to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: Box<dyn error::Error + Send + Sync>,
    },

    #[error("invalid output mode: {0:?}")]
    InvalidOutputMode(String),
}

impl From<font_ops::Error> for Error {
    fn from(e: font_ops::Error) -> Self {
        if e.is_encoding() { Error::Encoding(e) } else { Error::Font(e) }
    }
}

pub type Result<T> = result::Result<T, Error>;

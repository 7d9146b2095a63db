//! All error types for the resx-translator crate.
//!
//! Every stage of the pipeline reports failures through [`Error`]. All of them are
//! terminal for the current run; the language catalog is the only path that degrades
//! instead of failing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing/unreadable source, empty credentials, identical languages, bad endpoint.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document is not a version 2.0 resx file or cannot be parsed as one.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("translation service returned HTTP {status}: {message}")]
    TranslationService { status: u16, message: String },

    #[error("translation count mismatch: submitted {expected} entries, received {actual}")]
    TranslationCountMismatch { expected: usize, actual: usize },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Creates a new invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema(message.into())
    }

    /// HTTP status carried by a [`Error::TranslationService`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TranslationService { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(value: quick_xml::Error) -> Self {
        Error::InvalidSchema(format!("XML parse error: {value}"))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::InvalidSchema(format!("malformed attribute: {value}"))
    }
}

impl From<quick_xml::encoding::EncodingError> for Error {
    fn from(value: quick_xml::encoding::EncodingError) -> Self {
        Error::InvalidSchema(format!("encoding error: {value}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Transport(value.to_string())
    }
}

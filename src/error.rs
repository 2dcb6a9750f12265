//! Error enum
use std::{fmt, path::PathBuf};

use oxilangtag::LanguageTagParseError;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Zip(zip::result::ZipError),
    AvroError(avro_rs::Error),
    Custom(String),

    /// Tag that is not well-formed BCP 47.
    InvalidLanguageTag(String, LanguageTagParseError),
    /// Transliteration table identifier outside of the known ones.
    UnknownTransliteration(String),
    UnknownSource {
        source: String,
        known: Vec<&'static str>,
    },
    UnsupportedLanguage {
        source: String,
        language: String,
        supported: Vec<&'static str>,
    },
    InvalidChunkCapacity(usize),
    NotEnoughFrequencyLists(usize),

    /// A chunk blob that could not be decoded.
    ChunkDecode {
        chunk: String,
        source: Box<Error>,
    },
    MalformedCountLine(String),
    MissingTotal,
    /// Counts following a `__total__` of 0.
    ZeroTotal,
    ArchiveExists(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Zip(e) => write!(f, "archive container error: {e}"),
            Error::AvroError(e) => write!(f, "avro error: {e}"),
            Error::Custom(s) => write!(f, "{s}"),
            Error::InvalidLanguageTag(tag, e) => write!(f, "invalid language tag {tag:?}: {e}"),
            Error::UnknownTransliteration(id) => write!(
                f,
                "unknown transliteration table: {id:?} (expected one of sr-Latn, az-Latn, kk-Latn)"
            ),
            Error::UnknownSource { source, known } => {
                write!(f, "unknown source {source:?}, known sources: {known:?}")
            }
            Error::UnsupportedLanguage {
                source,
                language,
                supported,
            } => write!(
                f,
                "language {language:?} is not supported by {source:?}, supported languages: {supported:?}"
            ),
            Error::InvalidChunkCapacity(c) => {
                write!(f, "chunk capacity must be at least 1 (got {c})")
            }
            Error::NotEnoughFrequencyLists(n) => write!(
                f,
                "merging frequencies requires at least 3 frequency lists (got {n})"
            ),
            Error::ChunkDecode { chunk, source } => {
                write!(f, "could not decode chunk {chunk:?}: {source}")
            }
            Error::MalformedCountLine(line) => write!(f, "malformed count line: {line:?}"),
            Error::MissingTotal => write!(f, "count list has no __total__ line before its counts"),
            Error::ZeroTotal => write!(f, "count list has counts but a __total__ of 0"),
            Error::ArchiveExists(path) => write!(f, "{path:?} already exists"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Zip(e) => Some(e),
            Error::AvroError(e) => Some(e),
            Error::ChunkDecode { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<avro_rs::Error> for Error {
    fn from(v: avro_rs::Error) -> Self {
        Self::AvroError(v)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(v: zip::result::ZipError) -> Self {
        Self::Zip(v)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

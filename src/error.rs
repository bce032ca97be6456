//! Unified error type for the redline engine.

use thiserror::Error;

/// Errors produced while parsing, comparing, or regenerating documents.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("zip archive error: {0}")]
    Zip(String),

    #[error("not a Word OOXML package")]
    NotWordprocessingFile,

    #[error("corrupted or truncated package: {0}")]
    Corrupted(String),

    #[error("required package part not found: {0}")]
    PartNotFound(String),

    #[error("malformed document: {0}")]
    InvalidFormat(String),

    #[error("unsupported feature: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<soapberry_zip::Error> for Error {
    fn from(err: soapberry_zip::Error) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Other(err.to_string())
    }
}

//! Error types for docscope library.

use crate::model::FileType;
use std::io;
use thiserror::Error;

/// Result type alias for docscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing an upload.
#[derive(Error, Debug)]
pub enum Error {
    /// The upload was rejected before any parsing was attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The parsing collaborator could not build a document model.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O error when staging or reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during report rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Classify the error for the response boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Io(_) | Error::Render(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse error classes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input; the caller must fix the upload
    Validation,
    /// Corrupt or malformed container
    Parse,
    /// Failure inside the service itself
    Internal,
}

impl ErrorKind {
    /// Snake-case name used in failure responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Parse => "parse",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Upload rejected by the request boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The file name carries no extension.
    #[error("File has no extension. Allowed extensions: .pdf, .docx")]
    MissingExtension,

    /// The extension is outside the allow-set.
    #[error("Invalid file type '.{0}'. Allowed extensions: .pdf, .docx")]
    UnsupportedExtension(String),

    /// The upload exceeds the size ceiling.
    #[error("File too large ({size} bytes). Maximum size: {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    /// The upload holds no bytes.
    #[error("File is empty")]
    EmptyFile,
}

/// Failure reported by a parsing collaborator.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The container signature does not match any supported format.
    #[error("Unknown file format: not a valid PDF or DOCX container")]
    UnknownFormat,

    /// The container was recognized but is corrupted or malformed.
    #[error("Corrupted document: {0}")]
    Corrupted(String),

    /// The collaborator produced a model for a different format.
    #[error("Expected a {expected} document but parsed a {actual} document")]
    Mismatch { expected: FileType, actual: FileType },

    /// The serialized document model could not be decoded.
    #[error("Invalid document model: {0}")]
    Model(String),

    /// No collaborator is registered for the format.
    #[error("No parser registered for {0} files")]
    NoParser(FileType),

    /// I/O error while reading the staged file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Model(err.to_string())
    }
}

/// Internal failure of a single check. Never surfaced as a finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    /// A bounding box holds non-finite coordinates.
    #[error("invalid geometry on page {page}: {detail}")]
    InvalidGeometry { page: u32, detail: String },

    /// A style attribute holds a value no renderer could produce.
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// The check panicked or hit an unexpected model shape.
    #[error("internal check failure: {0}")]
    Internal(String),
}

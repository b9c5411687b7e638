//! Container format detection and validation.
//!
//! Parsing collaborators sniff staged uploads here before building a model,
//! so that a renamed or truncated file is reported as a parse error rather
//! than analyzed.

use crate::error::ParseError;
use crate::model::FileType;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const PDF_EOF: &[u8] = b"%%EOF";

/// ZIP local file header, the first record of every OOXML package.
const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";
/// ZIP end of central directory record.
const ZIP_END_OF_DIRECTORY: &[u8] = b"PK\x05\x06";

/// Bytes inspected at the end of a file: the PDF trailer may be followed by
/// junk, and the ZIP directory record by an archive comment.
const TAIL_LEN: u64 = 64 * 1024 + 22;

/// Container information sniffed from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFormat {
    /// Format implied by the signature
    pub file_type: FileType,
    /// PDF version (e.g., "1.7"); `None` for OOXML packages
    pub version: Option<String>,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "PDF {}", version),
            None => f.write_str("OOXML package"),
        }
    }
}

/// Detect the container format from the leading bytes of a file.
///
/// # Arguments
/// * `data` - Byte slice containing at least the first 8 bytes of the file
///
/// # Returns
/// * `Ok(ContainerFormat)` if the data starts with a PDF or ZIP signature
/// * `Err(ParseError::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat, ParseError> {
    if data.starts_with(PDF_MAGIC) {
        if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
            return Err(ParseError::Corrupted("truncated PDF header".into()));
        }
        let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
        let version = String::from_utf8_lossy(version_bytes).to_string();
        if !is_valid_version(&version) {
            return Err(ParseError::Corrupted(format!(
                "invalid PDF version '{}'",
                version
            )));
        }
        return Ok(ContainerFormat {
            file_type: FileType::Pdf,
            version: Some(version),
        });
    }

    if data.starts_with(ZIP_LOCAL_HEADER) {
        return Ok(ContainerFormat {
            file_type: FileType::Docx,
            version: None,
        });
    }

    // An archive with no entries starts directly with its directory record.
    if data.starts_with(ZIP_END_OF_DIRECTORY) {
        return Err(ParseError::Corrupted("empty ZIP archive".into()));
    }

    Err(ParseError::UnknownFormat)
}

/// Detect the container format of a file.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat, ParseError> {
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(16);
    file.by_ref().take(16).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Verify that a file is a complete container of the expected type.
///
/// Checks the leading signature and the trailing record (`%%EOF` for PDF,
/// the end of central directory for ZIP), which catches truncated uploads.
pub fn verify_container<P: AsRef<Path>>(
    path: P,
    expected: FileType,
) -> Result<ContainerFormat, ParseError> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    if format.file_type != expected {
        return Err(ParseError::Mismatch {
            expected,
            actual: format.file_type,
        });
    }

    let tail = read_tail(path)?;
    let trailer = match format.file_type {
        FileType::Pdf => PDF_EOF,
        FileType::Docx => ZIP_END_OF_DIRECTORY,
    };
    if !contains(&tail, trailer) {
        return Err(ParseError::Corrupted(format!(
            "{} is truncated: missing {}",
            format,
            match format.file_type {
                FileType::Pdf => "%%EOF marker",
                FileType::Docx => "end of central directory",
            }
        )));
    }

    Ok(format)
}

fn read_tail(path: &Path) -> Result<Vec<u8>, ParseError> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    file.seek(SeekFrom::Start(len.saturating_sub(TAIL_LEN)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    Ok(tail)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(
        detect_format_from_bytes(data),
        Ok(ContainerFormat {
            file_type: FileType::Pdf,
            ..
        })
    )
}

/// Check if bytes start with a ZIP (OOXML) header.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_LOCAL_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.file_type, FileType::Pdf);
        assert_eq!(format.version.as_deref(), Some("1.7"));
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_zip() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.file_type, FileType::Docx);
        assert!(format.version.is_none());
        assert!(is_zip_bytes(data));
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(ParseError::UnknownFormat)));
        assert!(!is_pdf_bytes(b"<!DOCTYPE html>"));
    }

    #[test]
    fn test_detect_truncated_header() {
        let result = detect_format_from_bytes(b"%PDF-");
        assert!(matches!(result, Err(ParseError::Corrupted(_))));
    }

    #[test]
    fn test_detect_invalid_version() {
        let result = detect_format_from_bytes(b"%PDF-abc\n");
        assert!(matches!(result, Err(ParseError::Corrupted(_))));
    }

    #[test]
    fn test_verify_complete_pdf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n")
            .unwrap();
        let format = verify_container(file.path(), FileType::Pdf).unwrap();
        assert_eq!(format.version.as_deref(), Some("1.4"));
    }

    #[test]
    fn test_verify_truncated_pdf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4\n1 0 obj\n<<").unwrap();
        let result = verify_container(file.path(), FileType::Pdf);
        assert!(matches!(result, Err(ParseError::Corrupted(_))));
    }

    #[test]
    fn test_verify_wrong_container() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04rest-of-archive PK\x05\x06").unwrap();
        let result = verify_container(file.path(), FileType::Pdf);
        assert!(matches!(
            result,
            Err(ParseError::Mismatch {
                expected: FileType::Pdf,
                actual: FileType::Docx
            })
        ));
        assert!(verify_container(file.path(), FileType::Docx).is_ok());
    }
}

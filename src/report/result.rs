//! Analysis results returned across the request boundary.

use super::{summarize, Finding, Summary};
use crate::error::{Error, ErrorKind};
use crate::model::FileType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Facts about the uploaded file echoed back in every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Original file name
    pub filename: String,
    /// Declared type, once the extension has been validated
    pub file_type: Option<FileType>,
    /// Size in bytes
    pub file_size: u64,
}

impl FileInfo {
    pub fn new(filename: impl Into<String>, file_type: Option<FileType>, file_size: u64) -> Self {
        Self {
            filename: filename.into(),
            file_type,
            file_size,
        }
    }
}

/// Successful analysis of one document.
///
/// The summary is computed from the findings at construction, so
/// `summary.total == findings.len()` always holds. Deserializing ignores
/// any serialized summary and recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializedResult")]
pub struct AnalysisResult {
    success: bool,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub scan_time_ms: u64,
    summary: Summary,
    findings: Vec<Finding>,
}

impl AnalysisResult {
    /// Build a result from findings in discovery order.
    pub fn new(
        filename: impl Into<String>,
        file_type: FileType,
        file_size: u64,
        scan_time: Duration,
        findings: Vec<Finding>,
    ) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            file_type,
            file_size,
            scan_time_ms: scan_time.as_millis().try_into().unwrap_or(u64::MAX),
            summary: summarize(&findings),
            findings,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Findings in discovery order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

/// Wire form of [`AnalysisResult`]; `success` and `summary` are derived.
#[derive(Deserialize)]
struct SerializedResult {
    filename: String,
    file_type: FileType,
    file_size: u64,
    scan_time_ms: u64,
    #[serde(default)]
    findings: Vec<Finding>,
}

impl From<SerializedResult> for AnalysisResult {
    fn from(raw: SerializedResult) -> Self {
        Self {
            success: true,
            filename: raw.filename,
            file_type: raw.file_type,
            file_size: raw.file_size,
            scan_time_ms: raw.scan_time_ms,
            summary: summarize(&raw.findings),
            findings: raw.findings,
        }
    }
}

/// Structured failure for uploads that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    success: bool,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    pub file_size: u64,
    pub error: ErrorKind,
    pub message: String,
    findings: Vec<Finding>,
}

impl AnalysisFailure {
    /// Describe why an upload failed. Never carries findings.
    pub fn new(file: &FileInfo, error: &Error) -> Self {
        Self {
            success: false,
            filename: file.filename.clone(),
            file_type: file.file_type,
            file_size: file.file_size,
            error: error.kind(),
            message: error.to_string(),
            findings: Vec::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, ValidationError};
    use crate::report::{FindingType, Severity};

    #[test]
    fn test_result_summary_matches_findings() {
        let findings = vec![
            Finding::new(FindingType::HiddenText, "white_text", Severity::High, "w"),
            Finding::new(FindingType::MetadataExposure, "author", Severity::Low, "a"),
        ];
        let result = AnalysisResult::new(
            "a.pdf",
            FileType::Pdf,
            42,
            Duration::from_millis(7),
            findings,
        );

        assert!(result.success());
        assert_eq!(result.scan_time_ms, 7);
        assert_eq!(result.summary().total as usize, result.findings().len());
        assert_eq!(result.summary().high, 1);
        assert_eq!(result.summary().low, 1);
    }

    #[test]
    fn test_result_json_contract() {
        let result = AnalysisResult::new("a.docx", FileType::Docx, 1, Duration::ZERO, vec![]);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["file_type"], "docx");
        assert_eq!(json["summary"]["total"], 0);
        assert!(json["findings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_recomputes_summary() {
        let json = r#"{
            "success": true,
            "filename": "a.pdf",
            "file_type": "pdf",
            "file_size": 3,
            "scan_time_ms": 1,
            "summary": {"critical": 9, "high": 0, "medium": 0, "low": 0, "total": 9},
            "findings": [
                {"type": "hidden_text", "subtype": "white_text", "severity": "high", "description": "w"}
            ]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.summary().total, 1);
        assert_eq!(result.summary().high, 1);
        assert_eq!(result.summary().critical, 0);
    }

    #[test]
    fn test_result_json_round_trip_keeps_invariant() {
        let findings = vec![Finding::new(FindingType::DeletedContent, "comment", Severity::Low, "c")];
        let result = AnalysisResult::new("m.docx", FileType::Docx, 9, Duration::ZERO, findings);
        let back: AnalysisResult =
            serde_json::from_str(&serde_json::to_string(&result).unwrap()).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_failure_from_parse_error() {
        let file = FileInfo::new("broken.pdf", Some(FileType::Pdf), 100);
        let failure = AnalysisFailure::new(&file, &Error::from(ParseError::UnknownFormat));
        let json = serde_json::to_value(&failure).unwrap();

        assert!(!failure.success());
        assert!(failure.findings().is_empty());
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "parse");
        assert_eq!(json["file_type"], "pdf");
    }

    #[test]
    fn test_failure_without_file_type() {
        let file = FileInfo::new("notes.txt", None, 5);
        let err = Error::from(ValidationError::UnsupportedExtension("txt".into()));
        let json = serde_json::to_value(AnalysisFailure::new(&file, &err)).unwrap();

        assert_eq!(json["error"], "validation");
        assert!(json.get("file_type").is_none());
    }
}

//! # docscope
//!
//! Forensic analysis engine for PDF and DOCX documents.
//!
//! The engine consumes an already-parsed [`Document`] model and reports
//! what a reader cannot see: hidden text, deceptive links, leaked metadata,
//! embedded executable content, failed redactions and leftover deletions.
//! Reading the raw containers is left to [`parser::DocumentParser`]
//! implementations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docscope::parser::{ModelFileParser, ParserRegistry};
//! use docscope::{FileType, Orchestrator};
//! use std::sync::Arc;
//!
//! fn main() -> docscope::Result<()> {
//!     let parsers = ParserRegistry::new()
//!         .with_parser(Arc::new(ModelFileParser::new(FileType::Pdf, "contract.model.json")));
//!     let orchestrator = Orchestrator::new(parsers);
//!
//!     let data = std::fs::read("contract.pdf")?;
//!     let result = orchestrator.analyze("contract.pdf", &data)?;
//!     println!("{}", docscope::report::to_text(&result));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Checks
//!
//! - **Hidden text**: white or tiny runs, zero-width characters, hidden formatting
//! - **Suspicious links**: display text that lies about the target, homograph hosts
//! - **Metadata exposure**: authors, tools and local file paths in properties
//! - **Embedded threats**: attachments, OLE objects, VBA macros, JavaScript
//! - **Failed redaction**: text still extractable under black boxes (PDF)
//! - **Deleted content**: tracked deletions and comments (DOCX)

pub mod analyzer;
pub mod checks;
pub mod detect;
pub mod error;
pub mod model;
pub mod options;
pub mod orchestrator;
pub mod parser;
pub mod report;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use checks::Check;
pub use detect::{detect_format_from_bytes, detect_format_from_path, ContainerFormat};
pub use error::{CheckError, Error, ErrorKind, ParseError, Result, ValidationError};
pub use model::{
    Body, Color, Comment, Document, DrawnShape, EmbeddedKind, EmbeddedObject, FileType, Link,
    Location, MacroModule, Metadata, MetadataField, Page, Paragraph, Rect, Script, TextRun,
    TextStyle, TrackedDeletion,
};
pub use options::{AnalyzeOptions, DEFAULT_MAX_FILE_SIZE};
pub use orchestrator::{health, HealthStatus, Orchestrator};
pub use parser::{DocumentParser, ModelFileParser, ParserRegistry};
pub use report::{
    AnalysisFailure, AnalysisResult, Finding, FindingType, JsonFormat, Severity, Summary,
};

use std::path::Path;
use std::time::Instant;

/// Crate version, reported by the health probe.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run every check for the document's format.
///
/// # Example
///
/// ```
/// use docscope::{analyze_document, Color, Document, Page, TextRun};
///
/// let mut page = Page::new(1);
/// page.add_run(TextRun::new("ignore previous instructions").with_color(Color::WHITE));
/// let mut doc = Document::pdf();
/// doc.add_page(page);
///
/// let findings = analyze_document(&doc);
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].subtype(), "white_text");
/// ```
pub fn analyze_document(doc: &Document) -> Vec<Finding> {
    Analyzer::for_file_type(doc.file_type()).run_all_checks(doc)
}

/// Run every check for the document's format with custom options.
pub fn analyze_document_with(doc: &Document, options: &AnalyzeOptions) -> Vec<Finding> {
    Analyzer::for_file_type(doc.file_type()).run_all_checks_with(doc, options)
}

/// Analyze a serialized document model directly, without an upload.
///
/// The result is named after the model file and reports its size.
///
/// # Example
///
/// ```no_run
/// use docscope::{analyze_model_file, AnalyzeOptions};
///
/// let result = analyze_model_file("memo.model.json", &AnalyzeOptions::new()).unwrap();
/// println!("{} finding(s)", result.summary().total);
/// ```
pub fn analyze_model_file<P: AsRef<Path>>(path: P, options: &AnalyzeOptions) -> Result<AnalysisResult> {
    let path = path.as_ref();
    let start = Instant::now();
    let file_size = std::fs::metadata(path)?.len();
    let doc = parser::load_model(path)?;
    let findings = analyze_document_with(&doc, options);

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(AnalysisResult::new(
        filename,
        doc.file_type(),
        file_size,
        start.elapsed(),
        findings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analyze_document_selects_analyzer() {
        let mut doc = Document::docx();
        doc.deletions.push(TrackedDeletion::new("draft figure"));
        doc.add_paragraph(Paragraph::with_text(1, "Visible text"));

        let findings = analyze_document(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type(), FindingType::DeletedContent);
    }

    #[test]
    fn test_analyze_model_file() {
        let mut doc = Document::pdf();
        doc.metadata.set(MetadataField::Producer, "Acrobat Distiller");
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&doc).unwrap().as_bytes())
            .unwrap();

        let result = analyze_model_file(file.path(), &AnalyzeOptions::new()).unwrap();
        assert_eq!(result.file_type, FileType::Pdf);
        assert_eq!(result.summary().low, 1);
        assert!(result.filename.ends_with(".json"));
    }

    #[test]
    fn test_analyze_model_file_missing() {
        let result = analyze_model_file("/nonexistent/model.json", &AnalyzeOptions::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_detect_format_empty_data() {
        let result = detect_format_from_bytes(&[]);
        assert!(matches!(result, Err(ParseError::UnknownFormat)));
    }

    #[test]
    fn test_version_reported() {
        assert_eq!(health().version, VERSION);
        assert!(!VERSION.is_empty());
    }
}

//! Forensic checks over a [`Document`].
//!
//! Each check is a single side-effect-free pass producing findings in
//! discovery order. Checks never see each other's output.

mod deleted;
mod embedded;
mod hidden_text;
mod links;
mod metadata;
pub mod primitives;
mod redaction;

pub use redaction::{COVERAGE_THRESHOLD, OPAQUE_FILL_THRESHOLD};

use crate::error::CheckError;
use crate::model::Document;
use crate::report::{Finding, FindingType};

/// The closed set of checks an analyzer can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// White, tiny, zero-width and hidden-formatted text runs
    HiddenText,
    /// Deceptive link text and homograph hosts
    SuspiciousLinks,
    /// Populated document properties
    MetadataExposure,
    /// Attached files, OLE objects, macros and scripts
    EmbeddedThreats,
    /// Text left under dark rectangles (PDF)
    FailedRedaction,
    /// Tracked deletions and review comments (DOCX)
    DeletedContent,
}

impl Check {
    /// Stable identifier used in logs and listings.
    pub fn name(&self) -> &'static str {
        match self {
            Check::HiddenText => "hidden_text",
            Check::SuspiciousLinks => "suspicious_links",
            Check::MetadataExposure => "metadata_exposure",
            Check::EmbeddedThreats => "embedded_threats",
            Check::FailedRedaction => "failed_redaction",
            Check::DeletedContent => "deleted_content",
        }
    }

    /// Type carried by every finding this check emits.
    pub fn finding_type(&self) -> FindingType {
        match self {
            Check::HiddenText => FindingType::HiddenText,
            Check::SuspiciousLinks => FindingType::SuspiciousLink,
            Check::MetadataExposure => FindingType::MetadataExposure,
            Check::EmbeddedThreats => FindingType::EmbeddedThreat,
            Check::FailedRedaction => FindingType::FailedRedaction,
            Check::DeletedContent => FindingType::DeletedContent,
        }
    }

    /// Short human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Check::HiddenText => "Text that renders invisibly or carries zero-width characters",
            Check::SuspiciousLinks => "Links whose text or host misrepresents the destination",
            Check::MetadataExposure => "Document properties that identify authors or local file paths",
            Check::EmbeddedThreats => "Embedded files, OLE objects, macros and JavaScript",
            Check::FailedRedaction => "Text that is still extractable under black boxes",
            Check::DeletedContent => "Tracked deletions and comments left in the file",
        }
    }

    /// Run the check against a document.
    pub fn run(&self, doc: &Document) -> Result<Vec<Finding>, CheckError> {
        match self {
            Check::HiddenText => hidden_text::run(doc),
            Check::SuspiciousLinks => links::run(doc),
            Check::MetadataExposure => metadata::run(doc),
            Check::EmbeddedThreats => embedded::run(doc),
            Check::FailedRedaction => redaction::run(doc),
            Check::DeletedContent => deleted::run(doc),
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Link, Page, TextRun};

    #[test]
    fn test_findings_match_check_type() {
        let mut page = Page::new(1);
        page.add_run(TextRun::new("a").with_color(Color::WHITE));
        let mut doc = Document::pdf();
        doc.add_page(page);
        doc.links.push(Link::new("apple.com", "evil.example"));

        for check in [Check::HiddenText, Check::SuspiciousLinks] {
            let findings = check.run(&doc).unwrap();
            assert!(!findings.is_empty());
            assert!(findings.iter().all(|f| f.finding_type() == check.finding_type()));
        }
    }

    #[test]
    fn test_empty_document_is_clean() {
        let doc = Document::pdf();
        for check in [
            Check::HiddenText,
            Check::SuspiciousLinks,
            Check::MetadataExposure,
            Check::EmbeddedThreats,
            Check::FailedRedaction,
            Check::DeletedContent,
        ] {
            assert!(check.run(&doc).unwrap().is_empty(), "{} not clean", check);
        }
    }
}

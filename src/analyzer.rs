//! Per-format analyzers: fixed, ordered check lists.

use crate::checks::Check;
use crate::error::CheckError;
use crate::model::{Document, FileType};
use crate::options::AnalyzeOptions;
use crate::report::Finding;
use log::{debug, warn};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

const PDF_CHECKS: [Check; 5] = [
    Check::HiddenText,
    Check::SuspiciousLinks,
    Check::MetadataExposure,
    Check::EmbeddedThreats,
    Check::FailedRedaction,
];

const DOCX_CHECKS: [Check; 5] = [
    Check::HiddenText,
    Check::SuspiciousLinks,
    Check::MetadataExposure,
    Check::EmbeddedThreats,
    Check::DeletedContent,
];

/// Analyzer for one document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analyzer {
    Pdf,
    Docx,
}

impl Analyzer {
    /// Select the analyzer for a file type.
    pub fn for_file_type(file_type: FileType) -> Self {
        match file_type {
            FileType::Pdf => Analyzer::Pdf,
            FileType::Docx => Analyzer::Docx,
        }
    }

    /// Format this analyzer handles.
    pub fn file_type(&self) -> FileType {
        match self {
            Analyzer::Pdf => FileType::Pdf,
            Analyzer::Docx => FileType::Docx,
        }
    }

    /// Checks in the order their findings are reported.
    pub fn checks(&self) -> &'static [Check] {
        match self {
            Analyzer::Pdf => &PDF_CHECKS,
            Analyzer::Docx => &DOCX_CHECKS,
        }
    }

    /// Run every check with default options.
    ///
    /// See [`Analyzer::run_all_checks_with`].
    pub fn run_all_checks(&self, doc: &Document) -> Vec<Finding> {
        self.run_all_checks_with(doc, &AnalyzeOptions::default())
    }

    /// Run every check and concatenate their findings in check order.
    ///
    /// A check that fails or panics contributes no findings; the failure is
    /// logged and the remaining checks still run. With `options.parallel`
    /// the checks execute on the rayon pool, which does not change the
    /// output order.
    pub fn run_all_checks_with(&self, doc: &Document, options: &AnalyzeOptions) -> Vec<Finding> {
        let checks = self.checks();

        let per_check: Vec<Vec<Finding>> = if options.parallel {
            checks
                .par_iter()
                .map(|check| run_check(*check, doc))
                .collect()
        } else {
            checks.iter().map(|check| run_check(*check, doc)).collect()
        };

        per_check.into_iter().flatten().collect()
    }
}

fn run_check(check: Check, doc: &Document) -> Vec<Finding> {
    let start = Instant::now();
    let findings = run_isolated(check.name(), || check.run(doc));
    debug!(
        "check {} produced {} finding(s) in {:?}",
        check.name(),
        findings.len(),
        start.elapsed()
    );
    findings
}

/// Run a check body, turning errors and panics into zero findings.
fn run_isolated<F>(name: &str, body: F) -> Vec<Finding>
where
    F: FnOnce() -> Result<Vec<Finding>, CheckError>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(findings)) => findings,
        Ok(Err(e)) => {
            warn!("check {} failed: {}", name, e);
            Vec::new()
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!("check {} panicked: {}", name, reason);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, MetadataField, Page, TextRun};
    use crate::report::{FindingType, Severity};

    #[test]
    fn test_check_lists() {
        assert_eq!(Analyzer::Pdf.checks().len(), 5);
        assert!(Analyzer::Pdf.checks().contains(&Check::FailedRedaction));
        assert!(!Analyzer::Pdf.checks().contains(&Check::DeletedContent));
        assert!(Analyzer::Docx.checks().contains(&Check::DeletedContent));
        assert!(!Analyzer::Docx.checks().contains(&Check::FailedRedaction));
        assert_eq!(Analyzer::for_file_type(FileType::Docx), Analyzer::Docx);
    }

    #[test]
    fn test_findings_in_check_order() {
        let mut page = Page::new(1);
        page.add_run(TextRun::new("hidden").with_color(Color::WHITE));
        let mut doc = Document::pdf();
        doc.add_page(page);
        doc.metadata.set(MetadataField::Author, "J. Doe");

        for parallel in [true, false] {
            let options = AnalyzeOptions::new().with_parallel(parallel);
            let findings = Analyzer::Pdf.run_all_checks_with(&doc, &options);
            assert_eq!(findings.len(), 2);
            assert_eq!(findings[0].finding_type(), FindingType::HiddenText);
            assert_eq!(findings[1].finding_type(), FindingType::MetadataExposure);
        }
    }

    #[test]
    fn test_failing_check_is_isolated() {
        let mut page = Page::new(1);
        page.add_run(TextRun::new("bad size").with_font_size(f32::INFINITY));
        let mut doc = Document::pdf();
        doc.add_page(page);
        doc.metadata.set(MetadataField::Creator, "Writer");

        let findings = Analyzer::Pdf.run_all_checks(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity(), Severity::Low);
    }

    #[test]
    fn test_run_isolated_swallows_panic() {
        let findings = run_isolated("boom", || panic!("unexpected model shape"));
        assert!(findings.is_empty());

        let findings = run_isolated("err", || Err(CheckError::Internal("x".into())));
        assert!(findings.is_empty());
    }
}

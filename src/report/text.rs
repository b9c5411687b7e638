//! Plain text rendering for analysis results.

use super::{AnalysisResult, Severity};
use std::fmt::Write;

/// Render a result as a human-readable report.
pub fn to_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let summary = result.summary();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} ({}, {})",
        result.filename,
        result.file_type.extension().to_uppercase(),
        format_file_size(result.file_size)
    );
    let _ = writeln!(
        out,
        "Scanned in {} ms: {} critical, {} high, {} medium, {} low ({} total)",
        result.scan_time_ms,
        summary.critical,
        summary.high,
        summary.medium,
        summary.low,
        summary.total
    );

    if summary.is_clean() {
        out.push_str("\nNo findings.\n");
        return out;
    }

    out.push('\n');
    for (i, finding) in result.findings().iter().enumerate() {
        let _ = write!(
            out,
            "{:>3}. [{}] {}/{}",
            i + 1,
            severity_label(finding.severity()),
            finding.finding_type(),
            finding.subtype()
        );
        if let Some(location) = finding.location() {
            let _ = write!(out, " ({})", location);
        }
        let _ = writeln!(out, "\n     {}", finding.description());
        if let Some(content) = finding.content() {
            let _ = writeln!(out, "     > {}", content.replace('\n', " "));
        }
    }

    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRITICAL",
        Severity::High => "HIGH",
        Severity::Medium => "MEDIUM",
        Severity::Low => "LOW",
    }
}

/// Convert a size in bytes to a human-readable string ("1.5 MB").
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let size = bytes as f64;
    if size < KB {
        format!("{} bytes", bytes)
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else if size < GB {
        format!("{:.1} MB", size / MB)
    } else {
        format!("{:.1} GB", size / GB)
    }
}

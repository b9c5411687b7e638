//! Hidden text: white, tiny, zero-width and explicitly hidden runs.

use super::primitives::{is_near_white, is_tiny_font, scan_zero_width, strip_zero_width};
use crate::error::CheckError;
use crate::model::{Document, Location, TextRun};
use crate::report::{Finding, FindingType, Severity};

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();

    for (location, run) in doc.runs() {
        inspect_run(location, run, &mut findings)?;
    }

    Ok(findings)
}

fn inspect_run(
    location: Location,
    run: &TextRun,
    findings: &mut Vec<Finding>,
) -> Result<(), CheckError> {
    if let Some(size) = run.style.font_size {
        if !size.is_finite() {
            return Err(CheckError::InvalidStyle(format!(
                "font size {} at {}",
                size, location
            )));
        }
    }

    // Whitespace in any color or size is invisible anyway.
    let visible = !strip_zero_width(&run.text).trim().is_empty();

    if visible {
        if let Some(color) = run.style.color.filter(is_near_white) {
            findings.push(
                hidden(
                    "white_text",
                    Severity::High,
                    format!(
                        "White or near-white text ({}) is invisible on a white background",
                        color.to_hex()
                    ),
                )
                .with_content(&run.text)
                .at(location),
            );
        }

        if let Some(size) = run.style.font_size.filter(|s| is_tiny_font(*s)) {
            findings.push(
                hidden(
                    "tiny_font",
                    Severity::High,
                    format!("Text rendered at {:.1}pt is too small to read", size.abs()),
                )
                .with_content(&run.text)
                .at(location),
            );
        }

        // The hidden run property only exists in word-processor markup.
        if run.style.hidden && matches!(location, Location::Paragraph(_)) {
            findings.push(
                hidden(
                    "hidden_attribute",
                    Severity::High,
                    "Text is formatted as hidden and does not display",
                )
                .with_content(&run.text)
                .at(location),
            );
        }
    }

    for hit in scan_zero_width(&run.text) {
        findings.push(
            hidden(
                "zero_width",
                Severity::Medium,
                format!(
                    "{} {} character(s) ({}) embedded in text",
                    hit.count,
                    hit.code_point(),
                    hit.name
                ),
            )
            .with_content(&run.text)
            .at(location),
        );
    }

    Ok(())
}

fn hidden(subtype: &str, severity: Severity, description: impl Into<String>) -> Finding {
    Finding::new(FindingType::HiddenText, subtype, severity, description)
}

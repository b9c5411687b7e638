//! Metadata exposure: populated document properties.

use super::primitives::looks_like_file_path;
use crate::error::CheckError;
use crate::model::Document;
use crate::report::{Finding, FindingType, Severity};

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    let findings = doc
        .metadata
        .populated()
        .map(|(field, value)| {
            let finding = if looks_like_file_path(value) {
                Finding::new(
                    FindingType::MetadataExposure,
                    "file_path_leak",
                    Severity::Medium,
                    format!("{} reveals a local file path", field.label()),
                )
            } else {
                Finding::new(
                    FindingType::MetadataExposure,
                    field.key(),
                    Severity::Low,
                    format!("{} is exposed in document metadata", field.label()),
                )
            };
            finding.with_content(value).with_field(field, value)
        })
        .collect();

    Ok(findings)
}

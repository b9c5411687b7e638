//! Suspicious links: deceptive display text and homograph hosts.

use super::primitives::{compare_link, LinkVerdict};
use crate::error::CheckError;
use crate::model::{Document, Link};
use crate::report::{Finding, FindingType, Severity};

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    Ok(doc.links.iter().flat_map(inspect_link).collect())
}

fn inspect_link(link: &Link) -> Vec<Finding> {
    compare_link(&link.text, &link.url)
        .into_iter()
        .map(|verdict| match verdict {
            LinkVerdict::DisplayMismatch { shown, actual } => Finding::new(
                FindingType::SuspiciousLink,
                "display_mismatch",
                Severity::High,
                format!("Link text shows '{}' but points to '{}'", shown, actual),
            ),
            LinkVerdict::Homograph { host, confusables } => {
                let lookalikes: Vec<String> = confusables
                    .iter()
                    .map(|c| format!("'{}' (U+{:04X}) for '{}'", c.found, c.found as u32, c.looks_like))
                    .collect();
                Finding::new(
                    FindingType::SuspiciousLink,
                    "homograph_attack",
                    Severity::Critical,
                    format!(
                        "Host '{}' mixes Latin letters with lookalike characters: {}",
                        host,
                        lookalikes.join(", ")
                    ),
                )
            }
        })
        .map(|finding| {
            finding
                .with_content(&link.text)
                .with_url(&link.url)
                .at_opt(link.location)
        })
        .collect()
}

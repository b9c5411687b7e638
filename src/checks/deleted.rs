//! Deleted content: tracked deletions and leftover review comments.

use crate::error::CheckError;
use crate::model::{Document, Location};
use crate::report::{Finding, FindingType, Severity};

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    let deletions = doc
        .deletions
        .iter()
        .filter(|d| !d.text.trim().is_empty())
        .map(|deletion| {
            Finding::new(
                FindingType::DeletedContent,
                "tracked_deletion",
                Severity::Medium,
                attributed("Deleted text is still stored in the file", deletion.author.as_deref()),
            )
            .with_content(&deletion.text)
            .at_opt(deletion.paragraph.map(Location::Paragraph))
        });

    let comments = doc
        .comments
        .iter()
        .filter(|c| !c.text.trim().is_empty())
        .map(|comment| {
            Finding::new(
                FindingType::DeletedContent,
                "comment",
                Severity::Low,
                attributed("Review comment left in the file", comment.author.as_deref()),
            )
            .with_content(&comment.text)
            .at_opt(comment.paragraph.map(Location::Paragraph))
        });

    Ok(deletions.chain(comments).collect())
}

fn attributed(description: &str, author: Option<&str>) -> String {
    match author.map(str::trim) {
        Some(author) if !author.is_empty() => format!("{} (by {})", description, author),
        _ => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, TrackedDeletion};

    #[test]
    fn test_deletions_then_comments() {
        let mut doc = Document::docx();
        doc.deletions = vec![
            TrackedDeletion::new("old salary: $90,000").by("hr").in_paragraph(7),
            TrackedDeletion::new("  "),
        ];
        doc.comments = vec![Comment::new("remove before sending").in_paragraph(2)];

        let findings = run(&doc).unwrap();
        assert_eq!(findings.len(), 2);

        assert_eq!(findings[0].subtype(), "tracked_deletion");
        assert_eq!(findings[0].severity(), Severity::Medium);
        assert_eq!(findings[0].content(), Some("old salary: $90,000"));
        assert_eq!(findings[0].location(), Some(Location::Paragraph(7)));
        assert!(findings[0].description().ends_with("(by hr)"));

        assert_eq!(findings[1].subtype(), "comment");
        assert_eq!(findings[1].severity(), Severity::Low);
        assert_eq!(findings[1].location(), Some(Location::Paragraph(2)));
    }

    #[test]
    fn test_clean_document() {
        assert!(run(&Document::docx()).unwrap().is_empty());
    }
}

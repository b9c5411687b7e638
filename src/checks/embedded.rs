//! Embedded threats: attached files, OLE objects, macros and scripts.

use super::primitives::match_keywords;
use crate::error::CheckError;
use crate::model::{Document, EmbeddedKind, EmbeddedObject, FileType, Location, MacroModule};
use crate::report::{format_file_size, Finding, FindingType, Severity};

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    let mut findings: Vec<Finding> = doc.embedded_objects.iter().map(embedded_finding).collect();

    for module in &doc.macros {
        findings.extend(macro_findings(module));
    }

    if doc.file_type() == FileType::Pdf {
        if let Some(first) = doc.scripts.first() {
            let finding = Finding::new(
                FindingType::EmbeddedThreat,
                "javascript",
                Severity::Critical,
                format!(
                    "Document contains {} JavaScript action(s), first triggered by {}",
                    doc.scripts.len(),
                    first.trigger
                ),
            )
            .with_content(&first.source)
            .at_opt(first.page.map(Location::Page));
            findings.push(finding);
        }
    }

    Ok(findings)
}

fn embedded_finding(object: &EmbeddedObject) -> Finding {
    let (subtype, noun) = match object.kind {
        EmbeddedKind::File => ("embedded_file", "Embedded file"),
        EmbeddedKind::OleObject => ("ole_object", "Embedded OLE object"),
    };

    let mut description = match &object.name {
        Some(name) => format!("{} '{}'", noun, name),
        None => noun.to_string(),
    };
    description.push_str(&format!(" ({})", format_file_size(object.size)));
    if let Some(content_type) = &object.content_type {
        description.push_str(&format!(", type {}", content_type));
    }

    let finding = Finding::new(FindingType::EmbeddedThreat, subtype, Severity::High, description);
    match &object.name {
        Some(name) => finding.with_content(name),
        None => finding,
    }
}

fn macro_findings(module: &MacroModule) -> Vec<Finding> {
    let mut findings = vec![Finding::new(
        FindingType::EmbeddedThreat,
        "macro_detected",
        Severity::Critical,
        format!("VBA macro module '{}' will run code when enabled", module.name),
    )
    .with_content(&module.source)];

    for keyword in match_keywords(&module.source) {
        findings.push(
            Finding::new(
                FindingType::EmbeddedThreat,
                "macro_keyword",
                Severity::Critical,
                format!("Macro module '{}' uses '{}'", module.name, keyword),
            )
            .with_content(keyword),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Script;

    #[test]
    fn test_embedded_file_and_ole_object() {
        let mut doc = Document::pdf();
        doc.embedded_objects = vec![
            EmbeddedObject::new(EmbeddedKind::File, 2048).with_name("invoice.exe"),
            EmbeddedObject::new(EmbeddedKind::OleObject, 10).with_content_type("application/x-ole"),
        ];

        let findings = run(&doc).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].subtype(), "embedded_file");
        assert_eq!(findings[0].severity(), Severity::High);
        assert_eq!(findings[0].content(), Some("invoice.exe"));
        assert!(findings[0].description().contains("2.0 KB"));
        assert_eq!(findings[1].subtype(), "ole_object");
        assert!(findings[1].description().contains("application/x-ole"));
    }

    #[test]
    fn test_macro_keywords_deduplicated() {
        let mut doc = Document::docx();
        doc.macros = vec![MacroModule::new(
            "ThisDocument",
            "Sub AutoOpen()\n  Shell \"a\"\n  Shell \"b\"\nEnd Sub",
        )];

        let findings = run(&doc).unwrap();
        let subtypes: Vec<_> = findings.iter().map(|f| f.subtype()).collect();
        assert_eq!(subtypes, vec!["macro_detected", "macro_keyword", "macro_keyword"]);
        assert!(findings.iter().all(|f| f.severity() == Severity::Critical));
        assert_eq!(findings[1].content(), Some("AutoOpen"));
        assert_eq!(findings[2].content(), Some("Shell"));
    }

    #[test]
    fn test_single_javascript_finding() {
        let mut doc = Document::pdf();
        let mut open = Script::new("OpenAction", "app.alert('hi')");
        open.page = Some(1);
        doc.scripts = vec![open, Script::new("Annotation", "this.print()")];

        let findings = run(&doc).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subtype(), "javascript");
        assert_eq!(findings[0].content(), Some("app.alert('hi')"));
        assert_eq!(findings[0].location(), Some(Location::Page(1)));
        assert!(findings[0].description().contains("2 JavaScript"));
    }

    #[test]
    fn test_scripts_ignored_for_docx() {
        let mut doc = Document::docx();
        doc.scripts = vec![Script::new("OpenAction", "x")];
        assert!(run(&doc).unwrap().is_empty());
    }
}

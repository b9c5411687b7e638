//! Findings: one reported forensic issue each.

use crate::model::{Location, MetadataField};
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept in excerpt fields.
pub const MAX_EXCERPT_CHARS: usize = 200;

/// Marker appended to truncated excerpts.
const ELLIPSIS: char = '…';

/// Severity of a finding, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities from most to least severe.
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    HiddenText,
    SuspiciousLink,
    MetadataExposure,
    EmbeddedThreat,
    FailedRedaction,
    DeletedContent,
}

impl FindingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingType::HiddenText => "hidden_text",
            FindingType::SuspiciousLink => "suspicious_link",
            FindingType::MetadataExposure => "metadata_exposure",
            FindingType::EmbeddedThreat => "embedded_threat",
            FindingType::FailedRedaction => "failed_redaction",
            FindingType::DeletedContent => "deleted_content",
        }
    }
}

impl std::fmt::Display for FindingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported issue.
///
/// Built once by a check through the `with_*` builders and never changed
/// afterwards; all excerpt-bearing fields go through [`truncate_excerpt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    finding_type: FindingType,

    subtype: String,

    severity: Severity,

    description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    paragraph: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl Finding {
    /// Create a finding without excerpt or location.
    pub fn new(
        finding_type: FindingType,
        subtype: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            finding_type,
            subtype: subtype.into(),
            severity,
            description: description.into(),
            content: None,
            page: None,
            paragraph: None,
            url: None,
            field: None,
            value: None,
        }
    }

    /// Attach a content excerpt (truncated).
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(truncate_excerpt(content));
        self
    }

    /// Attach a location.
    pub fn at(mut self, location: Location) -> Self {
        self.page = location.page();
        self.paragraph = location.paragraph();
        self
    }

    /// Attach a location if one is known.
    pub fn at_opt(self, location: Option<Location>) -> Self {
        match location {
            Some(location) => self.at(location),
            None => self,
        }
    }

    /// Attach the link target.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(truncate_excerpt(url));
        self
    }

    /// Attach the metadata field and its (truncated) value.
    pub fn with_field(mut self, field: MetadataField, value: &str) -> Self {
        self.field = Some(field.key().to_string());
        self.value = Some(truncate_excerpt(value));
        self
    }

    pub fn finding_type(&self) -> FindingType {
        self.finding_type
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Location of the finding, if any.
    pub fn location(&self) -> Option<Location> {
        match (self.page, self.paragraph) {
            (Some(page), _) => Some(Location::Page(page)),
            (None, Some(paragraph)) => Some(Location::Paragraph(paragraph)),
            (None, None) => None,
        }
    }
}

/// Bound an excerpt to [`MAX_EXCERPT_CHARS`] characters.
///
/// Longer text is cut on a character boundary and suffixed with `…`.
pub fn truncate_excerpt(text: &str) -> String {
    match text.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((cut, _)) => {
            let mut excerpt = text[..cut].to_string();
            excerpt.push(ELLIPSIS);
            excerpt
        }
        None => text.to_string(),
    }
}

//! Document-level types.

use super::{
    Comment, EmbeddedObject, Link, Location, MacroModule, Page, Paragraph, Script, TextRun,
    TrackedDeletion,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
}

impl FileType {
    /// Every supported format, in a fixed order.
    pub const ALL: [FileType; 2] = [FileType::Pdf, FileType::Docx];

    /// Resolve a file extension (with or without the leading dot, any case).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            _ => None,
        }
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// The text-bearing part of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Body {
    /// Paginated content (PDF)
    Pages(Vec<Page>),
    /// Flat paragraph flow (word-processor)
    Paragraphs(Vec<Paragraph>),
}

/// A parsed document, normalized across formats.
///
/// Built once by a parsing collaborator and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages or paragraphs
    pub body: Body,

    /// Document properties
    #[serde(default)]
    pub metadata: Metadata,

    /// Hyperlinks in document order
    #[serde(default)]
    pub links: Vec<Link>,

    /// Embedded files and OLE objects
    #[serde(default)]
    pub embedded_objects: Vec<EmbeddedObject>,

    /// VBA macro modules
    #[serde(default)]
    pub macros: Vec<MacroModule>,

    /// JavaScript actions (PDF)
    #[serde(default)]
    pub scripts: Vec<Script>,

    /// Tracked-change deletions (word-processor)
    #[serde(default)]
    pub deletions: Vec<TrackedDeletion>,

    /// Reviewer comments (word-processor)
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Document {
    /// Create an empty PDF document.
    pub fn pdf() -> Self {
        Self::with_body(Body::Pages(Vec::new()))
    }

    /// Create an empty word-processor document.
    pub fn docx() -> Self {
        Self::with_body(Body::Paragraphs(Vec::new()))
    }

    fn with_body(body: Body) -> Self {
        Self {
            body,
            metadata: Metadata::default(),
            links: Vec::new(),
            embedded_objects: Vec::new(),
            macros: Vec::new(),
            scripts: Vec::new(),
            deletions: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Format this model was built from.
    pub fn file_type(&self) -> FileType {
        match self.body {
            Body::Pages(_) => FileType::Pdf,
            Body::Paragraphs(_) => FileType::Docx,
        }
    }

    /// Pages of a PDF document (empty for word-processor documents).
    pub fn pages(&self) -> &[Page] {
        match &self.body {
            Body::Pages(pages) => pages,
            Body::Paragraphs(_) => &[],
        }
    }

    /// Paragraphs of a word-processor document (empty for PDF documents).
    pub fn paragraphs(&self) -> &[Paragraph] {
        match &self.body {
            Body::Paragraphs(paragraphs) => paragraphs,
            Body::Pages(_) => &[],
        }
    }

    /// Add a page. Ignored unless the body is paginated.
    pub fn add_page(&mut self, page: Page) {
        if let Body::Pages(pages) = &mut self.body {
            pages.push(page);
        }
    }

    /// Add a paragraph. Ignored unless the body is a paragraph flow.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        if let Body::Paragraphs(paragraphs) = &mut self.body {
            paragraphs.push(paragraph);
        }
    }

    /// Every text run with its location, in document order.
    pub fn runs(&self) -> Vec<(Location, &TextRun)> {
        match &self.body {
            Body::Pages(pages) => pages
                .iter()
                .flat_map(|p| p.runs.iter().map(move |r| (Location::Page(p.number), r)))
                .collect(),
            Body::Paragraphs(paragraphs) => paragraphs
                .iter()
                .flat_map(|p| p.runs.iter().map(move |r| (Location::Paragraph(p.index), r)))
                .collect(),
        }
    }

    /// Number of pages or paragraphs.
    pub fn unit_count(&self) -> usize {
        match &self.body {
            Body::Pages(pages) => pages.len(),
            Body::Paragraphs(paragraphs) => paragraphs.len(),
        }
    }
}

/// Known document property fields.
///
/// Declaration order is the order fields are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Title,
    Subject,
    Author,
    Keywords,
    Creator,
    Producer,
    Company,
    Manager,
    LastModifiedBy,
    Application,
    Template,
    HyperlinkBase,
    CreationDate,
    ModificationDate,
}

impl MetadataField {
    /// Every field, in reporting order.
    pub const ALL: [MetadataField; 14] = [
        MetadataField::Title,
        MetadataField::Subject,
        MetadataField::Author,
        MetadataField::Keywords,
        MetadataField::Creator,
        MetadataField::Producer,
        MetadataField::Company,
        MetadataField::Manager,
        MetadataField::LastModifiedBy,
        MetadataField::Application,
        MetadataField::Template,
        MetadataField::HyperlinkBase,
        MetadataField::CreationDate,
        MetadataField::ModificationDate,
    ];

    /// Snake-case key used in reports.
    pub fn key(&self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Subject => "subject",
            MetadataField::Author => "author",
            MetadataField::Keywords => "keywords",
            MetadataField::Creator => "creator",
            MetadataField::Producer => "producer",
            MetadataField::Company => "company",
            MetadataField::Manager => "manager",
            MetadataField::LastModifiedBy => "last_modified_by",
            MetadataField::Application => "application",
            MetadataField::Template => "template",
            MetadataField::HyperlinkBase => "hyperlink_base",
            MetadataField::CreationDate => "creation_date",
            MetadataField::ModificationDate => "modification_date",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MetadataField::Title => "Title",
            MetadataField::Subject => "Subject",
            MetadataField::Author => "Author",
            MetadataField::Keywords => "Keywords",
            MetadataField::Creator => "Creator",
            MetadataField::Producer => "Producer",
            MetadataField::Company => "Company",
            MetadataField::Manager => "Manager",
            MetadataField::LastModifiedBy => "Last modified by",
            MetadataField::Application => "Application",
            MetadataField::Template => "Template",
            MetadataField::HyperlinkBase => "Hyperlink base",
            MetadataField::CreationDate => "Creation date",
            MetadataField::ModificationDate => "Modification date",
        }
    }

    /// Look up a field by its snake-case key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Document properties keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<MetadataField, String>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(&mut self, field: MetadataField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Builder-style variant of [`Metadata::set`].
    pub fn with(mut self, field: MetadataField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value.
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Fields holding a non-blank value, in reporting order.
    pub fn populated(&self) -> impl Iterator<Item = (MetadataField, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (*field, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Check if no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}

//! Links, embedded objects, active content and revision artifacts.

use serde::{Deserialize, Serialize};

/// Where in the document something was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Page number (1-indexed, PDF)
    Page(u32),
    /// Paragraph index (1-indexed, word-processor)
    Paragraph(u32),
}

impl Location {
    /// Page number, if this is a page location.
    pub fn page(&self) -> Option<u32> {
        match self {
            Location::Page(n) => Some(*n),
            Location::Paragraph(_) => None,
        }
    }

    /// Paragraph index, if this is a paragraph location.
    pub fn paragraph(&self) -> Option<u32> {
        match self {
            Location::Paragraph(n) => Some(*n),
            Location::Page(_) => None,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Page(n) => write!(f, "page {}", n),
            Location::Paragraph(n) => write!(f, "paragraph {}", n),
        }
    }
}

/// A hyperlink: what the reader sees and where it actually goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display text
    pub text: String,

    /// Target URL
    pub url: String,

    /// Source location
    #[serde(default)]
    pub location: Option<Location>,
}

impl Link {
    /// Create a new link.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            location: None,
        }
    }

    /// Set the source location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Kind of embedded binary object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedKind {
    /// Embedded file attachment (PDF `/EmbeddedFile`)
    File,
    /// OLE object (OOXML `word/embeddings`)
    OleObject,
}

/// An embedded binary object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedObject {
    /// Object kind
    pub kind: EmbeddedKind,

    /// File name or part name if known
    #[serde(default)]
    pub name: Option<String>,

    /// Inferred content type (e.g., "application/x-msdownload")
    #[serde(default)]
    pub content_type: Option<String>,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

impl EmbeddedObject {
    /// Create a new embedded object.
    pub fn new(kind: EmbeddedKind, size: u64) -> Self {
        Self {
            kind,
            name: None,
            content_type: None,
            size,
        }
    }

    /// Set the object name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the inferred content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A decoded VBA macro module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroModule {
    /// Module name (e.g., "ThisDocument")
    pub name: String,

    /// Decoded source text
    pub source: String,
}

impl MacroModule {
    /// Create a new macro module.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Executable script content found in a PDF (JavaScript actions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Where the script is attached (e.g., "OpenAction", "Names/JavaScript")
    pub trigger: String,

    /// Script source
    pub source: String,

    /// Page the script is attached to, if any
    #[serde(default)]
    pub page: Option<u32>,
}

impl Script {
    /// Create a new script.
    pub fn new(trigger: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            source: source.into(),
            page: None,
        }
    }
}

/// Text removed under change tracking but still stored in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDeletion {
    /// Deleted text
    pub text: String,

    /// Revision author
    #[serde(default)]
    pub author: Option<String>,

    /// Paragraph the deletion belongs to
    #[serde(default)]
    pub paragraph: Option<u32>,
}

impl TrackedDeletion {
    /// Create a new tracked deletion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
            paragraph: None,
        }
    }

    /// Set the revision author.
    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the paragraph index.
    pub fn in_paragraph(mut self, index: u32) -> Self {
        self.paragraph = Some(index);
        self
    }
}

/// A reviewer comment left in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text
    pub text: String,

    /// Comment author
    #[serde(default)]
    pub author: Option<String>,

    /// Paragraph the comment is anchored to
    #[serde(default)]
    pub paragraph: Option<u32>,
}

impl Comment {
    /// Create a new comment.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
            paragraph: None,
        }
    }

    /// Set the comment author.
    pub fn by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the paragraph index.
    pub fn in_paragraph(mut self, index: u32) -> Self {
        self.paragraph = Some(index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accessors() {
        assert_eq!(Location::Page(3).page(), Some(3));
        assert_eq!(Location::Page(3).paragraph(), None);
        assert_eq!(Location::Paragraph(7).paragraph(), Some(7));
        assert_eq!(Location::Paragraph(7).to_string(), "paragraph 7");
    }

    #[test]
    fn test_location_serde() {
        let json = serde_json::to_string(&Location::Page(2)).unwrap();
        assert_eq!(json, r#"{"page":2}"#);
        let back: Location = serde_json::from_str(r#"{"paragraph":4}"#).unwrap();
        assert_eq!(back, Location::Paragraph(4));
    }

    #[test]
    fn test_embedded_kind_serde() {
        let json = serde_json::to_string(&EmbeddedKind::OleObject).unwrap();
        assert_eq!(json, "\"ole_object\"");
    }
}

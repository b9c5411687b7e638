//! Document model types.
//!
//! This module defines the normalized, format-independent representation
//! that parsing collaborators build and checks consume. A PDF becomes a list
//! of pages holding positioned text runs and drawn shapes; a DOCX becomes a
//! flat list of paragraphs. Everything else (metadata, links, embedded
//! objects, macros, scripts, revisions) sits beside the body.

mod document;
mod objects;
mod page;
mod text;

pub use document::{Body, Document, FileType, Metadata, MetadataField};
pub use objects::{
    Comment, EmbeddedKind, EmbeddedObject, Link, Location, MacroModule, Script, TrackedDeletion,
};
pub use page::{DrawnShape, Page, Paragraph, Rect};
pub use text::{Color, TextRun, TextStyle};

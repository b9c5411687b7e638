//! Parsing collaborators that turn a staged upload into a [`Document`].
//!
//! The engine never reads PDF or OOXML internals itself. A collaborator is
//! registered per [`FileType`] and the orchestrator hands it the path of the
//! staged upload.
//!
//! # Example
//!
//! ```no_run
//! use docscope::parser::{ModelFileParser, ParserRegistry};
//! use docscope::FileType;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> docscope::Result<()> {
//!     let mut registry = ParserRegistry::new();
//!     registry.register(Arc::new(ModelFileParser::new(FileType::Pdf, "report.model.json")));
//!
//!     let doc = registry.parse(FileType::Pdf, Path::new("report.pdf"))?;
//!     println!("{} page(s)", doc.pages().len());
//!     Ok(())
//! }
//! ```

mod model_file;

pub use model_file::{load_model, ModelFileParser};

use crate::error::ParseError;
use crate::model::{Document, FileType};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for parsing collaborators.
///
/// Implement this trait to plug a real PDF or OOXML reader into the engine.
pub trait DocumentParser: Send + Sync {
    /// Format this parser builds models for.
    fn file_type(&self) -> FileType;

    /// Get the name of this parser.
    fn name(&self) -> &str;

    /// Build a document model from the file at `path`.
    ///
    /// Corrupt or unsupported input must be reported as a [`ParseError`],
    /// never as a partial model.
    fn parse(&self, path: &Path) -> Result<Document, ParseError>;
}

/// Registry for parsing collaborators.
///
/// Holds at most one parser per file type; registering again replaces the
/// previous one.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<FileType, Arc<dyn DocumentParser>>,
    by_name: HashMap<String, Arc<dyn DocumentParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser for its file type.
    pub fn register(&mut self, parser: Arc<dyn DocumentParser>) {
        if let Some(previous) = self.parsers.insert(parser.file_type(), parser.clone()) {
            self.by_name.remove(&previous.name().to_lowercase());
        }
        self.by_name.insert(parser.name().to_lowercase(), parser);
    }

    /// Builder-style variant of [`ParserRegistry::register`].
    pub fn with_parser(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.register(parser);
        self
    }

    /// Get the parser for a file type.
    pub fn get(&self, file_type: FileType) -> Option<Arc<dyn DocumentParser>> {
        self.parsers.get(&file_type).cloned()
    }

    /// Get a parser by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentParser>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a file type has a parser.
    pub fn supports(&self, file_type: FileType) -> bool {
        self.parsers.contains_key(&file_type)
    }

    /// File types with a registered parser, in [`FileType::ALL`] order.
    pub fn file_types(&self) -> Vec<FileType> {
        FileType::ALL
            .into_iter()
            .filter(|t| self.supports(*t))
            .collect()
    }

    /// Parse a file with the parser registered for `file_type`.
    pub fn parse(&self, file_type: FileType, path: &Path) -> Result<Document, ParseError> {
        let parser = self.get(file_type).ok_or(ParseError::NoParser(file_type))?;
        parser.parse(path)
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ParserRegistry").field("parsers", &names).finish()
    }
}

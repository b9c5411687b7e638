//! Collaborator that reads a pre-extracted document model from JSON.

use super::DocumentParser;
use crate::detect;
use crate::error::ParseError;
use crate::model::{Document, FileType};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Load a serialized document model.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Document, ParseError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Parser backed by a model file produced by an external extractor.
///
/// The staged upload is still sniffed, so a corrupt or mislabeled upload is
/// rejected even when a model exists for it.
#[derive(Debug, Clone)]
pub struct ModelFileParser {
    file_type: FileType,
    model_path: PathBuf,
    name: String,
}

impl ModelFileParser {
    /// Create a parser for `file_type` that serves the model at `model_path`.
    pub fn new(file_type: FileType, model_path: impl Into<PathBuf>) -> Self {
        Self {
            file_type,
            model_path: model_path.into(),
            name: format!("{}-model", file_type),
        }
    }

    /// Path of the model file.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl DocumentParser for ModelFileParser {
    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, path: &Path) -> Result<Document, ParseError> {
        let format = detect::verify_container(path, self.file_type)?;
        debug!("{} container verified: {}", path.display(), format);

        let doc = load_model(&self.model_path)?;
        if doc.file_type() != self.file_type {
            return Err(ParseError::Mismatch {
                expected: self.file_type,
                actual: doc.file_type(),
            });
        }
        Ok(doc)
    }
}

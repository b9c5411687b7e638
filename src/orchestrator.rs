//! Request handling: validation, staging, parsing and analysis of one upload.

use crate::analyzer::Analyzer;
use crate::error::{ParseError, Result, ValidationError};
use crate::model::FileType;
use crate::options::AnalyzeOptions;
use crate::parser::ParserRegistry;
use crate::report::{AnalysisFailure, AnalysisResult, FileInfo};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Liveness report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Report that the engine is alive. Holds no state.
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "healthy",
        version: crate::VERSION,
    }
}

/// Runs one upload through validation, parsing and analysis.
///
/// Every request is independent: the orchestrator holds only configuration
/// and the parser registry, so it can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    parsers: ParserRegistry,
    options: AnalyzeOptions,
}

impl Orchestrator {
    /// Create an orchestrator with default options.
    pub fn new(parsers: ParserRegistry) -> Self {
        Self {
            parsers,
            options: AnalyzeOptions::default(),
        }
    }

    /// Set analysis options.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    /// Validate an upload's name and size without touching its content.
    pub fn validate(&self, filename: &str, size: u64) -> std::result::Result<FileType, ValidationError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(ValidationError::MissingExtension)?;
        let file_type = FileType::from_extension(ext)
            .ok_or_else(|| ValidationError::UnsupportedExtension(ext.to_lowercase()))?;

        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        if size > self.options.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                limit: self.options.max_file_size,
            });
        }
        Ok(file_type)
    }

    /// Analyze an upload.
    ///
    /// Validation happens before any parser runs. The bytes are staged in a
    /// temporary file for the parser and the file is removed on every exit
    /// path.
    pub fn analyze(&self, filename: &str, data: &[u8]) -> Result<AnalysisResult> {
        let file_size = data.len() as u64;
        let file_type = self.validate(filename, file_size)?;
        let parser = self
            .parsers
            .get(file_type)
            .ok_or(ParseError::NoParser(file_type))?;

        let start = Instant::now();
        let staged = StagedFile::create(data, file_type, self.options.temp_dir.as_deref())?;
        debug!("staged {} at {}", filename, staged.path().display());

        let doc = parser.parse(staged.path())?;
        drop(staged);

        if doc.file_type() != file_type {
            return Err(ParseError::Mismatch {
                expected: file_type,
                actual: doc.file_type(),
            }
            .into());
        }

        let findings = Analyzer::for_file_type(file_type).run_all_checks_with(&doc, &self.options);
        let result = AnalysisResult::new(filename, file_type, file_size, start.elapsed(), findings);

        info!(
            "analyzed {} ({}, {} bytes): {} finding(s) in {} ms",
            filename,
            file_type,
            file_size,
            result.summary().total,
            result.scan_time_ms
        );
        Ok(result)
    }

    /// Analyze an upload, converting any error into a failure response.
    pub fn respond(&self, filename: &str, data: &[u8]) -> std::result::Result<AnalysisResult, AnalysisFailure> {
        self.analyze(filename, data).map_err(|err| {
            warn!("rejected {}: {}", filename, err);
            let file_type = Path::new(filename)
                .extension()
                .and_then(|e| e.to_str())
                .and_then(FileType::from_extension);
            AnalysisFailure::new(&FileInfo::new(filename, file_type, data.len() as u64), &err)
        })
    }

    /// Analyze a file on disk, validating its size before reading it.
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let filename = display_name(path);
        self.validate(&filename, std::fs::metadata(path)?.len())?;
        let data = std::fs::read(path)?;
        self.analyze(&filename, &data)
    }

    /// Async variant of [`Orchestrator::analyze_path`].
    ///
    /// Reads the file with tokio and runs the analysis on the blocking pool.
    #[cfg(feature = "async")]
    pub async fn analyze_path_async<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let filename = display_name(path);
        self.validate(&filename, tokio::fs::metadata(path).await?.len())?;
        let data = tokio::fs::read(path).await?;

        let this = self.clone();
        tokio::task::spawn_blocking(move || this.analyze(&filename, &data))
            .await
            .map_err(|e| crate::Error::Io(io::Error::other(e.to_string())))?
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Upload bytes staged on disk for a parser, removed when dropped.
struct StagedFile {
    file: Option<NamedTempFile>,
}

impl StagedFile {
    fn create(data: &[u8], file_type: FileType, dir: Option<&Path>) -> io::Result<Self> {
        let suffix = format!(".{}", file_type.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix("docscope-").suffix(&suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file: Some(file) })
    }

    fn path(&self) -> &Path {
        match &self.file {
            Some(file) => file.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let path = file.path().to_path_buf();
            match file.close() {
                Ok(()) => debug!("removed staged file {}", path.display()),
                Err(e) => warn!("failed to remove staged file {}: {}", path.display(), e),
            }
        }
    }
}

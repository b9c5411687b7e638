//! Findings, aggregation and response rendering.

mod finding;
mod json;
mod result;
mod summary;
mod text;

pub use finding::{truncate_excerpt, Finding, FindingType, Severity, MAX_EXCERPT_CHARS};
pub use json::{to_json, JsonFormat};
pub use result::{AnalysisFailure, AnalysisResult, FileInfo};
pub use summary::{summarize, Summary};
pub use text::{format_file_size, to_text};

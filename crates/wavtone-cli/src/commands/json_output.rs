//! JSON output types for machine-readable CLI output.
//!
//! Printed instead of the colored console report when `--json` is given.

use serde::Serialize;
use wavtone::{PipelineReport, PipelineStage, TransformConfig, WavError};

/// Error codes for failures outside the pipeline itself.
pub mod error_codes {
    /// Input file could not be opened
    pub const FILE_OPEN: &str = "CLI_001";
    /// Output file could not be created
    pub const FILE_CREATE: &str = "CLI_002";
}

/// One error in a JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category (input, header, output, usage, io)
    pub category: String,
    /// Pipeline stage the failure happened in (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl JsonError {
    /// Creates a file-handling error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            category: "io".to_string(),
            stage: None,
        }
    }

    /// Creates an error from a pipeline failure.
    pub fn from_wav(err: &WavError, stage: Option<PipelineStage>) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            category: err.category().to_string(),
            stage: stage.map(|s| s.as_str().to_string()),
        }
    }
}

/// Result of one transform invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub success: bool,
    pub input: String,
    pub output: String,
    /// Effective configuration after defaults, file and flags
    pub config: TransformConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PipelineReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl ProcessOutput {
    pub fn success(input: &str, output: &str, config: TransformConfig, report: PipelineReport) -> Self {
        Self {
            success: true,
            input: input.to_string(),
            output: output.to_string(),
            config,
            report: Some(report),
            errors: Vec::new(),
        }
    }

    pub fn failure(input: &str, output: &str, config: TransformConfig, error: JsonError) -> Self {
        Self {
            success: false,
            input: input.to_string(),
            output: output.to_string(),
            config,
            report: None,
            errors: vec![error],
        }
    }
}

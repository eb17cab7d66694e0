//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use unboxer_core::ArchiveInspection;
use unboxer_core::BatchReport;
use unboxer_core::JobReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a single-archive extraction result
    fn format_job_result(&self, report: &JobReport) -> Result<()>;

    /// Format a batch run result
    fn format_batch_result(&self, report: &BatchReport) -> Result<()>;

    /// Format an archive inspection
    fn format_inspection(&self, inspection: &ArchiveInspection) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Reports an error while still carrying the partial data.
    pub fn error_with_data(
        operation: impl Into<String>,
        data: T,
        error: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }
}

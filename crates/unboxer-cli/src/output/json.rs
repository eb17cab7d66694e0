//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;
use unboxer_core::ArchiveInspection;
use unboxer_core::ArchiveOutcome;
use unboxer_core::BatchReport;
use unboxer_core::JobReport;
use unboxer_core::layout::RootDiscovery;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JobOutput {
    archive: String,
    format: String,
    base_name: String,
    output_dir: String,
    layout: String,
    roots: Option<Vec<String>>,
    files: usize,
    directories: usize,
    links: usize,
    bytes_written: u64,
    moves: usize,
    duration_ms: u128,
}

impl From<&JobReport> for JobOutput {
    fn from(report: &JobReport) -> Self {
        Self {
            archive: report.archive.display().to_string(),
            format: report.format.to_string(),
            base_name: report.base_name.to_string(),
            output_dir: report.output_dir.display().to_string(),
            layout: report.layout.to_string(),
            roots: report.roots_discovered.then(|| report.roots.clone()),
            files: report.entries.files,
            directories: report.entries.directories,
            links: report.entries.links,
            bytes_written: report.entries.bytes_written,
            moves: report.moves,
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeOutput {
    Extracted(JobOutput),
    Skipped { archive: String, reason: String },
    Failed { archive: String, error: String },
}

impl From<&ArchiveOutcome> for OutcomeOutput {
    fn from(outcome: &ArchiveOutcome) -> Self {
        match outcome {
            ArchiveOutcome::Extracted(report) => Self::Extracted(report.into()),
            ArchiveOutcome::Skipped { archive, reason } => Self::Skipped {
                archive: archive.display().to_string(),
                reason: reason.clone(),
            },
            ArchiveOutcome::Failed { archive, error } => Self::Failed {
                archive: archive.display().to_string(),
                error: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    total: usize,
    extracted: usize,
    skipped: usize,
    failed: usize,
    duration_ms: u128,
    archives: Vec<OutcomeOutput>,
}

impl OutputFormatter for JsonFormatter {
    fn format_job_result(&self, report: &JobReport) -> Result<()> {
        let output = JsonOutput::success("extract", JobOutput::from(report));
        Self::output(&output)
    }

    fn format_batch_result(&self, report: &BatchReport) -> Result<()> {
        let data = BatchOutput {
            total: report.total(),
            extracted: report.extracted(),
            skipped: report.skipped(),
            failed: report.failed(),
            duration_ms: report.duration.as_millis(),
            archives: report.outcomes.iter().map(OutcomeOutput::from).collect(),
        };

        let output = if report.has_failures() {
            let error = format!("{} archive(s) failed", report.failed());
            JsonOutput::error_with_data("run", data, error)
        } else {
            JsonOutput::success("run", data)
        };
        Self::output(&output)
    }

    fn format_inspection(&self, inspection: &ArchiveInspection) -> Result<()> {
        #[derive(Serialize)]
        struct InspectionOutput {
            archive: String,
            format: String,
            base_name: String,
            layout: String,
            entry_count: Option<usize>,
            roots: Option<Vec<String>>,
            listing_error: Option<String>,
        }

        let (roots, listing_error) = match &inspection.roots {
            RootDiscovery::Found(roots) => (Some(roots.iter().cloned().collect()), None),
            RootDiscovery::Failed(err) => (None, Some(err.to_string())),
        };

        let data = InspectionOutput {
            archive: inspection.archive.display().to_string(),
            format: inspection.format.to_string(),
            base_name: inspection.base_name.to_string(),
            layout: inspection.layout.to_string(),
            entry_count: inspection.entry_count,
            roots,
            listing_error,
        };

        let output = JsonOutput::success("inspect", data);
        Self::output(&output)
    }
}

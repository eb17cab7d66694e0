//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use unboxer_core::ArchiveInspection;
use unboxer_core::ArchiveOutcome;
use unboxer_core::BatchReport;
use unboxer_core::JobReport;
use unboxer_core::layout::RootDiscovery;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn mark(&self, symbol: &str, plain: &str, color: console::Color) -> String {
        if self.use_colors {
            style(symbol).fg(color).bold().to_string()
        } else {
            plain.to_string()
        }
    }

    fn write_job_details(&self, report: &JobReport) {
        let _ = self.term.write_line(&format!(
            "  Output:      {}",
            report.output_dir.display()
        ));
        let _ = self.term.write_line(&format!(
            "  Format:      {}  Layout: {}",
            report.format, report.layout
        ));
        let _ = self.term.write_line(&format!(
            "  Files:       {}  Directories: {}",
            Self::format_number(report.entries.files),
            Self::format_number(report.entries.directories)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:  {}",
            Self::format_size(report.entries.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Links:       {}", report.entries.links));
            let roots = if report.roots_discovered {
                report.roots.join(", ")
            } else {
                "(listing failed)".to_string()
            };
            let _ = self.term.write_line(&format!("  Roots:       {roots}"));
            let _ = self
                .term
                .write_line(&format!("  Moves:       {}", report.moves));
            let _ = self
                .term
                .write_line(&format!("  Duration:    {:?}", report.duration));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_job_result(&self, report: &JobReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "{} Extracted {}",
            self.mark("✓", "OK", console::Color::Green),
            report.archive.display()
        ));
        self.write_job_details(report);

        Ok(())
    }

    fn format_batch_result(&self, report: &BatchReport) -> Result<()> {
        let stderr = Term::stderr();

        for outcome in &report.outcomes {
            match outcome {
                ArchiveOutcome::Extracted(job) => {
                    if self.quiet {
                        continue;
                    }
                    let _ = self.term.write_line(&format!(
                        "{} {} -> {} ({}, {} files)",
                        self.mark("✓", "OK", console::Color::Green),
                        job.archive.display(),
                        job.output_dir.display(),
                        job.layout,
                        Self::format_number(job.entries.files)
                    ));
                }
                ArchiveOutcome::Skipped { archive, reason } => {
                    if self.quiet {
                        continue;
                    }
                    let _ = self.term.write_line(&format!(
                        "{} {}: {reason}",
                        self.mark("-", "SKIP", console::Color::Yellow),
                        archive.display()
                    ));
                }
                ArchiveOutcome::Failed { archive, error } => {
                    // Failures are shown even in quiet mode
                    let _ = stderr.write_line(&format!(
                        "{} {}: {error}",
                        self.mark("✗", "FAIL", console::Color::Red),
                        archive.display()
                    ));
                }
            }
        }

        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Batch complete: {} extracted, {} skipped, {} failed ({} archives, {:.1}s)",
            Self::format_number(report.extracted()),
            Self::format_number(report.skipped()),
            Self::format_number(report.failed()),
            Self::format_number(report.total()),
            report.duration.as_secs_f64()
        ));

        Ok(())
    }

    fn format_inspection(&self, inspection: &ArchiveInspection) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("Archive:   {}", inspection.archive.display()));
        let _ = self
            .term
            .write_line(&format!("Format:    {}", inspection.format));
        let _ = self
            .term
            .write_line(&format!("Output:    {}/", inspection.base_name));
        let _ = self
            .term
            .write_line(&format!("Layout:    {}", inspection.layout));

        match &inspection.roots {
            RootDiscovery::Found(roots) => {
                if let Some(count) = inspection.entry_count {
                    let _ = self
                        .term
                        .write_line(&format!("Entries:   {}", Self::format_number(count)));
                }
                let _ = self
                    .term
                    .write_line(&format!("Roots:     {}", roots.len()));
                for root in roots {
                    let _ = self.term.write_line(&format!("  {root}"));
                }
            }
            RootDiscovery::Failed(err) => {
                let _ = self.term.write_line(&format!(
                    "{} listing failed: {err}",
                    self.mark("⚠", "WARNING:", console::Color::Yellow)
                ));
            }
        }

        Ok(())
    }
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use jobscout_domain::{DigestBatch, DigestMessage, SponsorConfidence, StoreStats};
use jobscout_janitor::JanitorMetrics;
use jobscout_pipeline::DiscoveryReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a digest message.
    pub fn format_digest(&self, message: &DigestMessage) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(message)?),
            OutputFormat::Table => Ok(match message {
                DigestMessage::Digest(batch) => self.format_batch_table(batch),
                DigestMessage::NoQualifyingJobs { generated_at } => self.colorize(
                    &format!(
                        "No qualifying jobs found ({})",
                        generated_at.format("%Y-%m-%d %H:%M UTC")
                    ),
                    "yellow",
                ),
            }),
        }
    }

    fn format_batch_table(&self, batch: &DigestBatch) -> String {
        let mut sections = vec![self.colorize(
            &format!(
                "Job Digest - {} ({} jobs)",
                batch.generated_at.format("%Y-%m-%d %H:%M UTC"),
                batch.len()
            ),
            "cyan",
        )];

        for group in &batch.groups {
            let mut builder = Builder::default();
            builder.push_record(["Score", "Title", "Company", "Location", "Sponsor", "Posted", "Entry-level"]);
            for entry in &group.entries {
                builder.push_record([
                    format!("{:.1}", entry.score),
                    entry.title.clone(),
                    entry.company.clone(),
                    format!("{} ({:?})", entry.location, entry.location_type),
                    self.confidence(entry.sponsor_confidence),
                    entry.posted_ago(),
                    entry.entry_level_reasoning.clone(),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));

            sections.push(format!(
                "\n{} ({})\n{}",
                self.colorize(group.category.as_str(), "magenta"),
                group.entries.len(),
                table
            ));
        }

        if batch.deferred > 0 {
            sections.push(self.info(&format!("{} more qualifying jobs deferred to the next digest", batch.deferred)));
        }

        sections.join("\n")
    }

    /// Format a discovery report.
    pub fn format_discovery(&self, report: &DiscoveryReport) -> Result<String> {
        if let OutputFormat::Json = self.format {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let rows = [
            ("Received", report.received),
            ("Over cap", report.over_cap),
            ("Already known", report.already_known),
            ("Evaluated", report.evaluated),
            ("Discarded (category)", report.discarded_other),
            ("Discarded (not entry-level)", report.discarded_not_entry_level),
            ("Sponsorship excluded", report.excluded),
            ("Abandoned", report.abandoned),
            ("Inserted", report.inserted),
        ];
        Ok(format!(
            "{}\n{}",
            self.key_value_table(&rows),
            self.format_stats_line(&report.stats)
        ))
    }

    /// Format store statistics.
    pub fn format_stats(&self, stats: &StoreStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => Ok(self.key_value_table(&[
                ("Total", stats.total),
                ("Sent", stats.sent),
                ("Unsent", stats.unsent),
            ])),
        }
    }

    /// Format janitor metrics.
    pub fn format_janitor(&self, metrics: &JanitorMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(metrics)?),
            OutputFormat::Table => Ok(metrics.summary()),
        }
    }

    fn format_stats_line(&self, stats: &StoreStats) -> String {
        self.info(&format!(
            "Store: {} total, {} sent, {} unsent",
            stats.total, stats.sent, stats.unsent
        ))
    }

    fn key_value_table(&self, rows: &[(&str, usize)]) -> String {
        let mut builder = Builder::default();
        for (key, value) in rows {
            builder.push_record([key.to_string(), value.to_string()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }

    fn confidence(&self, confidence: SponsorConfidence) -> String {
        let color = match confidence {
            SponsorConfidence::High => "green",
            SponsorConfidence::Medium => "yellow",
            SponsorConfidence::Low => "red",
        };
        self.colorize(confidence.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "magenta" => text.magenta().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

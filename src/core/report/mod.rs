//! Plan report generation
//!
//! Renders the enrolled grid, term workload, WAYS progress and backlog of a
//! course plan. Markdown is the only format for now.

pub mod markdown;

use crate::core::metrics::{plan_summary, PlanSummary};
use crate::core::store::CourseStore;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use markdown::MarkdownReporter;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown tables
    Markdown,
}

impl ReportFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Everything a report needs, computed once.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Report heading
    pub title: &'a str,
    /// Course collections
    pub store: &'a CourseStore,
    /// Statistics over `store`
    pub summary: PlanSummary,
}

impl<'a> ReportContext<'a> {
    /// Build a context, computing the plan summary against `graduation_units`
    #[must_use]
    pub fn new(title: &'a str, store: &'a CourseStore, graduation_units: u32) -> Self {
        Self {
            title,
            store,
            summary: plan_summary(store.enrolled(), store.backlog(), graduation_units),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Render report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!(
            "markdown".parse::<ReportFormat>(),
            Ok(ReportFormat::Markdown)
        );
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Markdown.extension(), "md");
    }
}

//! Report command handler
//!
//! Renders the plan (grid, workload, WAYS progress, backlog) as a report.

use course_planner::config::Config;
use course_planner::core::report::{MarkdownReporter, ReportContext, ReportFormat, ReportGenerator};
use course_planner::core::state::Planner;
use course_planner::{error, info};
use std::path::Path;
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `planner` - Planner holding the loaded courses
/// * `output_file` - Optional output path; stdout when omitted
/// * `format_str` - Report format (markdown)
/// * `title` - Report heading
/// * `config` - Configuration providing the graduation target
pub fn run(
    planner: &Planner,
    output_file: Option<&Path>,
    format_str: &str,
    title: &str,
    config: &Config,
) {
    if let Err(err) = generate_report(planner, output_file, format_str, title, config) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
    }
}

fn generate_report(
    planner: &Planner,
    output_file: Option<&Path>,
    format_str: &str,
    title: &str,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;
    let reporter = match format {
        ReportFormat::Markdown => MarkdownReporter::new(),
    };

    let ctx = ReportContext::new(title, &planner.state().store, config.graduation_units());

    let Some(path) = output_file else {
        let content = reporter
            .render(&ctx)
            .map_err(|e| format!("✗ Failed to render report: {e}"))?;
        print!("{content}");
        return Ok(());
    };

    reporter
        .generate(&ctx, path)
        .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))?;
    info!("Report written to {} ({format})", path.display());
    println!("✓ Report generated: {}", path.display());
    Ok(())
}

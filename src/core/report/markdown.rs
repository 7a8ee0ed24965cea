//! Markdown report generator
//!
//! Tables only, so the output reads fine in a terminal and renders on GitHub.

use crate::core::metrics::{grouped_courses, Term};
use crate::core::models::Course;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

struct TermRow {
    label: String,
    courses: usize,
    units: u32,
    hours: u32,
    workload: &'static str,
    gpa: String,
}

struct RequirementRow {
    key: &'static str,
    name: &'static str,
    earned: u32,
    required: u32,
    measure: &'static str,
    status: &'static str,
}

struct QuarterCell {
    name: &'static str,
    courses: String,
}

struct YearRow {
    name: &'static str,
    quarters: Vec<QuarterCell>,
}

struct BacklogRow {
    id: String,
    code: String,
    units: u32,
    hours: u32,
    term: String,
    ways: String,
}

#[derive(Template)]
#[template(path = "plan_report.md")]
struct PlanReport<'a> {
    title: &'a str,
    gpa: String,
    completed_units: u32,
    graduation_units: u32,
    graduation_percent: String,
    planned_units: u32,
    requirements_met: usize,
    enrolled_count: usize,
    terms: Vec<TermRow>,
    requirements: Vec<RequirementRow>,
    years: Vec<YearRow>,
    backlog: Vec<BacklogRow>,
}

/// Escape text for a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn ways_list(course: &Course) -> String {
    if course.ways.is_empty() {
        return "—".to_string();
    }
    course
        .ways
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn slot_list(courses: &[&Course]) -> String {
    if courses.is_empty() {
        return "—".to_string();
    }
    courses
        .iter()
        .map(|c| format!("{} ({}u, {})", cell(&c.code), c.units, c.grade))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build<'a>(ctx: &'a ReportContext) -> PlanReport<'a> {
        let summary = &ctx.summary;

        let terms = summary
            .terms
            .iter()
            .map(|t| TermRow {
                label: t.term.to_string(),
                courses: t.course_count,
                units: t.total_units,
                hours: t.total_hours,
                workload: t.happiness.emoji_label(),
                gpa: format!("{:.2}", t.gpa),
            })
            .collect();

        let requirements = summary
            .requirements
            .iter()
            .map(|r| RequirementRow {
                key: r.category.key(),
                name: r.category.name(),
                earned: r.earned,
                required: r.required,
                measure: if r.category.is_unit_weighted() {
                    "units"
                } else {
                    "courses"
                },
                status: if r.is_satisfied() { "✓" } else { "…" },
            })
            .collect();

        let years = grouped_courses(ctx.store.enrolled())
            .into_iter()
            .map(|group| YearRow {
                name: group.year.name(),
                quarters: group
                    .quarters
                    .iter()
                    .map(|(quarter, courses)| QuarterCell {
                        name: quarter.name(),
                        courses: slot_list(courses),
                    })
                    .collect(),
            })
            .collect();

        let backlog = ctx
            .store
            .backlog()
            .iter()
            .map(|c| BacklogRow {
                id: cell(c.id.as_str()),
                code: cell(&c.code),
                units: c.units,
                hours: c.hours,
                term: Term::of(c).to_string(),
                ways: ways_list(c),
            })
            .collect();

        PlanReport {
            title: ctx.title,
            gpa: format!("{:.2}", summary.gpa),
            completed_units: summary.completed_units,
            graduation_units: summary.graduation_units,
            graduation_percent: format!("{:.1}", summary.graduation_percent()),
            planned_units: summary.planned_units,
            requirements_met: summary.requirements_met(),
            enrolled_count: summary.enrolled_count,
            terms,
            requirements,
            years,
            backlog,
        }
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build(ctx).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{Grade, Quarter, WaysCategory, Year};
    use crate::core::models::CourseDraft;
    use crate::core::store::{Collection, CourseField, CourseStore};

    fn sample_store() -> CourseStore {
        let mut draft = CourseDraft::with_code("CS106A");
        draft.units = 5;
        draft.hours = 20;
        draft.ways = vec![WaysCategory::Aqr];
        let store = CourseStore::new().add(&draft, Collection::Enrolled);
        let id = store.enrolled()[0].id.clone();
        let store = store.update_field(&id, CourseField::Grade, Grade::A.label());

        let mut later = CourseDraft::with_code("ARTSTUDI60");
        later.quarter = Quarter::Spring;
        later.year = Year::Sophomore;
        store.add(&later, Collection::Backlog)
    }

    #[test]
    fn test_render_contains_sections() {
        let store = sample_store();
        let ctx = ReportContext::new("My Plan", &store, 180);
        let report = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(report.starts_with("# My Plan"));
        assert!(report.contains("| Cumulative GPA | 4.00 |"));
        assert!(report.contains("| Completed units | 5 / 180 (2.8%) |"));
        assert!(report.contains("| Autumn (Freshman) | 1 | 5 | 20 | Happy 😃 | 4.00 |"));
        assert!(report.contains("| AQR | Applied Quantitative Reasoning | 1 / 1 courses | ✓ |"));
        assert!(report.contains("| CE | Creative Expression | 0 / 2 units | … |"));
        assert!(report.contains("### Senior"));
        assert!(report.contains("| Autumn | CS106A (5u, A) |"));
        assert!(report.contains("ARTSTUDI60"));
        assert!(report.contains("Spring (Sophomore)"));
    }

    #[test]
    fn test_pipes_in_codes_are_escaped() {
        let mut draft = CourseDraft::with_code("CS|106");
        draft.units = 4;
        let store = CourseStore::new()
            .add(&draft, Collection::Enrolled)
            .add(&CourseDraft::with_code("MATH|51"), Collection::Backlog);
        let ctx = ReportContext::new("Pipes", &store, 180);
        let report = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(report.contains("| Autumn | CS\\|106 (4u, N/A) |"));
        assert!(report.contains("| MATH\\|51 |"));
        assert!(!report.contains("CS|106"));
    }

    #[test]
    fn test_render_empty_plan() {
        let store = CourseStore::new();
        let ctx = ReportContext::new("Empty", &store, 180);
        let report = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(report.contains("_No enrolled courses yet._"));
        assert!(report.contains("_Backlog is empty._"));
        assert!(report.contains("| Cumulative GPA | 0.00 |"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("plan.md");
        let store = sample_store();
        let ctx = ReportContext::new("File Plan", &store, 180);

        MarkdownReporter::new().generate(&ctx, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# File Plan"));
    }
}

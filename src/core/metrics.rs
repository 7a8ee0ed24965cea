//! Derived statistics over the enrolled courses: GPA, completed units,
//! WAYS progress and per-term workload.
//!
//! Everything here is a pure function of the course list.

use crate::core::constants::{classify_workload, Happiness, Quarter, WaysCategory, Year};
use crate::core::models::Course;
use std::collections::BTreeMap;
use std::fmt;

/// Accumulated value per WAYS category (course count, or units for CE).
pub type CategoryProgress = BTreeMap<WaysCategory, u32>;

/// A (quarter, academic year) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    /// Quarter of the term
    pub quarter: Quarter,
    /// Academic year of the term
    pub year: Year,
}

impl Term {
    /// Create a term key
    #[must_use]
    pub const fn new(quarter: Quarter, year: Year) -> Self {
        Self { quarter, year }
    }

    /// Term a course is scheduled in
    #[must_use]
    pub const fn of(course: &Course) -> Self {
        Self::new(course.quarter, course.year)
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    /// Chronological: by year, then quarter.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.quarter).cmp(&(other.year, other.quarter))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.quarter, self.year)
    }
}

/// Statistics for one term
#[derive(Debug, Clone, PartialEq)]
pub struct TermStats {
    /// The term these numbers describe
    pub term: Term,
    /// Sum of units
    pub total_units: u32,
    /// Sum of weekly hours
    pub total_hours: u32,
    /// Workload label for `total_hours`
    pub happiness: Happiness,
    /// GPA over the term's graded courses
    pub gpa: f64,
    /// Number of courses in the term
    pub course_count: usize,
}

/// Progress toward a single WAYS requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementProgress {
    /// Category being tracked
    pub category: WaysCategory,
    /// Accumulated count (or units)
    pub earned: u32,
    /// Required count (or units)
    pub required: u32,
}

impl RequirementProgress {
    /// Whether the requirement is met
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.earned >= self.required
    }
}

/// Round a display value (e.g. a percentage) to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted GPA over courses with a numeric grade, rounded half-up to 2 decimals.
///
/// Sums run on grade points in tenths so exact halves round up.
/// Ungraded courses are left out of both sums; with nothing graded the result is `0.0`.
#[must_use]
pub fn cumulative_gpa<'a>(courses: impl IntoIterator<Item = &'a Course>) -> f64 {
    let (tenths, units) = courses
        .into_iter()
        .filter_map(|course| course.grade.tenths().map(|t| (t, course.units)))
        .fold((0_u64, 0_u64), |(tenths, units), (t, u)| {
            (tenths + u64::from(t) * u64::from(u), units + u64::from(u))
        });

    if units == 0 {
        return 0.0;
    }
    // hundredths = floor(10 * tenths / units + 1/2)
    let hundredths = (20 * tenths + units) / (2 * units);
    f64::from(u32::try_from(hundredths).unwrap_or(u32::MAX)) / 100.0
}

/// Units of every course that has any grade (an F still counts).
#[must_use]
pub fn total_completed_units(courses: &[Course]) -> u32 {
    courses
        .iter()
        .filter(|course| course.grade.is_graded())
        .map(|course| course.units)
        .sum()
}

/// Per-category accumulation over tagged courses.
///
/// The unit-weighted category (CE) adds the course's units; every other
/// category adds one per tagged course. Every category is present, even at zero.
#[must_use]
pub fn category_progress(courses: &[Course]) -> CategoryProgress {
    let mut progress: CategoryProgress = WaysCategory::ALL.iter().map(|w| (*w, 0)).collect();

    for course in courses {
        for way in &course.ways {
            let contribution = if way.is_unit_weighted() {
                course.units
            } else {
                1
            };
            *progress.entry(*way).or_insert(0) += contribution;
        }
    }

    progress
}

/// Category progress paired with each requirement, in requirement-sheet order.
#[must_use]
pub fn requirement_progress(courses: &[Course]) -> Vec<RequirementProgress> {
    let progress = category_progress(courses);
    WaysCategory::ALL
        .iter()
        .map(|category| RequirementProgress {
            category: *category,
            earned: progress.get(category).copied().unwrap_or(0),
            required: category.required(),
        })
        .collect()
}

/// Group courses by term and compute each term's load, workload label and GPA.
///
/// Only terms that hold at least one course are reported, in chronological order.
#[must_use]
pub fn term_statistics(courses: &[Course]) -> Vec<TermStats> {
    let mut groups: BTreeMap<Term, Vec<&Course>> = BTreeMap::new();
    for course in courses {
        groups.entry(Term::of(course)).or_default().push(course);
    }

    groups
        .into_iter()
        .map(|(term, members)| {
            let total_units = members.iter().map(|c| c.units).sum();
            let total_hours = members.iter().map(|c| c.hours).sum();
            TermStats {
                term,
                total_units,
                total_hours,
                happiness: classify_workload(total_hours),
                gpa: cumulative_gpa(members.iter().copied()),
                course_count: members.len(),
            }
        })
        .collect()
}

/// Courses of one academic year, split by quarter
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    /// Academic year
    pub year: Year,
    /// Every quarter in calendar order with its courses (possibly none)
    pub quarters: Vec<(Quarter, Vec<&'a Course>)>,
}

/// Lay enrolled courses out on the 4×4 year/quarter grid, empty slots included.
#[must_use]
pub fn grouped_courses(courses: &[Course]) -> Vec<YearGroup<'_>> {
    Year::ALL
        .iter()
        .map(|year| YearGroup {
            year: *year,
            quarters: Quarter::ALL
                .iter()
                .map(|quarter| {
                    let slot = courses
                        .iter()
                        .filter(|c| c.year == *year && c.quarter == *quarter)
                        .collect();
                    (*quarter, slot)
                })
                .collect(),
        })
        .collect()
}

/// Headline numbers for a whole plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Cumulative GPA
    pub gpa: f64,
    /// Units with an assigned grade
    pub completed_units: u32,
    /// Units needed to graduate
    pub graduation_units: u32,
    /// Units planned across all enrolled courses, graded or not
    pub planned_units: u32,
    /// WAYS progress in requirement-sheet order
    pub requirements: Vec<RequirementProgress>,
    /// Per-term statistics in chronological order
    pub terms: Vec<TermStats>,
    /// Number of enrolled courses
    pub enrolled_count: usize,
    /// Number of backlog courses
    pub backlog_count: usize,
}

impl PlanSummary {
    /// Share of the graduation target already completed, capped at 100.
    #[must_use]
    pub fn graduation_percent(&self) -> f64 {
        if self.graduation_units == 0 {
            return 100.0;
        }
        let percent = f64::from(self.completed_units) / f64::from(self.graduation_units) * 100.0;
        round2(percent.min(100.0))
    }

    /// Number of WAYS requirements met
    #[must_use]
    pub fn requirements_met(&self) -> usize {
        self.requirements.iter().filter(|r| r.is_satisfied()).count()
    }
}

/// Compute every headline statistic at once.
#[must_use]
pub fn plan_summary(enrolled: &[Course], backlog: &[Course], graduation_units: u32) -> PlanSummary {
    PlanSummary {
        gpa: cumulative_gpa(enrolled),
        completed_units: total_completed_units(enrolled),
        graduation_units,
        planned_units: enrolled.iter().map(|c| c.units).sum(),
        requirements: requirement_progress(enrolled),
        terms: term_statistics(enrolled),
        enrolled_count: enrolled.len(),
        backlog_count: backlog.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::Grade;
    use crate::core::models::CourseId;

    fn course(units: u32, hours: u32, grade: Grade, term: (Quarter, Year)) -> Course {
        Course {
            id: CourseId::new(format!("{units}-{hours}-{grade}")),
            code: "TEST".to_string(),
            units,
            hours,
            quarter: term.0,
            year: term.1,
            grade,
            ways: Vec::new(),
        }
    }

    const AUT1: (Quarter, Year) = (Quarter::Autumn, Year::Freshman);
    const WIN1: (Quarter, Year) = (Quarter::Winter, Year::Freshman);
    const AUT2: (Quarter, Year) = (Quarter::Autumn, Year::Sophomore);

    #[test]
    fn test_gpa_weighted_example() {
        let courses = [course(5, 10, Grade::A, AUT1), course(3, 9, Grade::BPlus, AUT1)];
        assert!((cumulative_gpa(&courses) - 3.74).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_excludes_ungraded() {
        let courses = [
            course(4, 10, Grade::B, AUT1),
            course(20, 10, Grade::NotGraded, AUT1),
        ];
        assert!((cumulative_gpa(&courses) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_empty_and_all_ungraded() {
        assert!(cumulative_gpa(&[]).abs() < f64::EPSILON);
        let courses = [course(3, 9, Grade::NotGraded, AUT1)];
        assert!(cumulative_gpa(&courses).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_counts_f_as_zero_points() {
        let courses = [course(4, 10, Grade::A, AUT1), course(4, 10, Grade::F, AUT1)];
        assert!((cumulative_gpa(&courses) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_rounds_to_two_places() {
        // (4.0 + 3.7 + 3.3) / 3 = 3.6666...
        let courses = [
            course(1, 1, Grade::A, AUT1),
            course(1, 1, Grade::AMinus, AUT1),
            course(1, 1, Grade::BPlus, AUT1),
        ];
        assert!((cumulative_gpa(&courses) - 3.67).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_exact_half_rounds_up() {
        // (4.2 * 1 + 3.3 * 3) / 4 = 3.525
        let courses = [
            course(1, 1, Grade::APlus, AUT1),
            course(3, 1, Grade::BPlus, AUT1),
        ];
        assert!((cumulative_gpa(&courses) - 3.53).abs() < 1e-9);
        assert!((term_statistics(&courses)[0].gpa - 3.53).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_halves_round_up_across_unit_mixes() {
        for grade_a in Grade::ALL {
            for grade_b in Grade::ALL {
                for units_a in 1..=20_u32 {
                    for units_b in 1..=20_u32 {
                        let courses = [
                            course(units_a, 1, grade_a, AUT1),
                            course(units_b, 1, grade_b, AUT1),
                        ];
                        let graded: Vec<_> = courses
                            .iter()
                            .filter_map(|c| c.grade.tenths().map(|t| (t, c.units)))
                            .collect();
                        let units: u32 = graded.iter().map(|(_, u)| u).sum();
                        let expected = if units == 0 {
                            0
                        } else {
                            let tenths: u32 = graded.iter().map(|(t, u)| t * u).sum();
                            // half-up on the exact rational 10 * tenths / units
                            (10 * tenths * 2 + units) / (2 * units)
                        };
                        let gpa = cumulative_gpa(&courses);
                        assert!(
                            (gpa * 100.0 - f64::from(expected)).abs() < 1e-6,
                            "{grade_a}x{units_a} + {grade_b}x{units_b}: got {gpa}, want {expected}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_completed_units_include_failed() {
        let courses = [
            course(5, 10, Grade::F, AUT1),
            course(3, 9, Grade::NotGraded, AUT1),
            course(4, 9, Grade::C, WIN1),
        ];
        assert_eq!(total_completed_units(&courses), 9);
    }

    #[test]
    fn test_category_progress_counts_and_units() {
        let mut a = course(5, 10, Grade::A, AUT1);
        a.ways = vec![WaysCategory::Ce, WaysCategory::Si];
        let mut b = course(3, 9, Grade::NotGraded, WIN1);
        b.ways = vec![WaysCategory::Ce, WaysCategory::Si];
        let mut c = course(4, 9, Grade::B, AUT2);
        c.ways = vec![WaysCategory::Er];

        let progress = category_progress(&[a, b, c]);
        assert_eq!(progress[&WaysCategory::Ce], 8);
        assert_eq!(progress[&WaysCategory::Si], 2);
        assert_eq!(progress[&WaysCategory::Er], 1);
        assert_eq!(progress[&WaysCategory::Aii], 0);
        assert_eq!(progress.len(), WaysCategory::ALL.len());
    }

    #[test]
    fn test_requirement_satisfaction() {
        let mut a = course(1, 1, Grade::A, AUT1);
        a.ways = vec![WaysCategory::Ce];
        let mut b = course(1, 1, Grade::A, AUT1);
        b.ways = vec![WaysCategory::Ce, WaysCategory::Fr];

        let reqs = requirement_progress(&[a, b]);
        let ce = reqs.iter().find(|r| r.category == WaysCategory::Ce).unwrap();
        assert_eq!(ce.earned, 2);
        assert!(ce.is_satisfied());
        let fr = reqs.iter().find(|r| r.category == WaysCategory::Fr).unwrap();
        assert!(fr.is_satisfied());
        let si = reqs.iter().find(|r| r.category == WaysCategory::Si).unwrap();
        assert!(!si.is_satisfied());
    }

    #[test]
    fn test_term_statistics_grouping() {
        let courses = [
            course(5, 20, Grade::A, AUT2),
            course(5, 20, Grade::A, AUT1),
            course(3, 25, Grade::BPlus, AUT1),
            course(4, 12, Grade::NotGraded, WIN1),
        ];
        let stats = term_statistics(&courses);
        assert_eq!(stats.len(), 3);

        assert_eq!(stats[0].term, Term::new(Quarter::Autumn, Year::Freshman));
        assert_eq!(stats[0].total_units, 8);
        assert_eq!(stats[0].total_hours, 45);
        assert_eq!(stats[0].happiness, Happiness::Medium);
        assert!((stats[0].gpa - 3.74).abs() < 1e-9);
        assert_eq!(stats[0].course_count, 2);

        assert_eq!(stats[1].term, Term::new(Quarter::Winter, Year::Freshman));
        assert_eq!(stats[1].happiness, Happiness::Happy);
        assert!(stats[1].gpa.abs() < f64::EPSILON);

        assert_eq!(stats[2].term, Term::new(Quarter::Autumn, Year::Sophomore));
    }

    #[test]
    fn test_term_display() {
        let term = Term::new(Quarter::Spring, Year::Junior);
        assert_eq!(term.to_string(), "Spring (Junior)");
    }

    #[test]
    fn test_grouped_courses_has_full_grid() {
        let courses = [course(5, 10, Grade::A, WIN1)];
        let grid = grouped_courses(&courses);
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|g| g.quarters.len() == 4));
        assert_eq!(grid[0].quarters[1].0, Quarter::Winter);
        assert_eq!(grid[0].quarters[1].1.len(), 1);
        assert!(grid[1].quarters.iter().all(|(_, slot)| slot.is_empty()));
    }

    #[test]
    fn test_plan_summary() {
        let enrolled = [course(90, 10, Grade::A, AUT1), course(5, 10, Grade::NotGraded, WIN1)];
        let backlog = [course(3, 9, Grade::NotGraded, AUT1)];
        let summary = plan_summary(&enrolled, &backlog, 180);

        assert_eq!(summary.completed_units, 90);
        assert_eq!(summary.planned_units, 95);
        assert!((summary.graduation_percent() - 50.0).abs() < 1e-9);
        assert_eq!(summary.backlog_count, 1);
        assert_eq!(summary.enrolled_count, 2);
        assert_eq!(summary.requirements_met(), 0);
    }
}

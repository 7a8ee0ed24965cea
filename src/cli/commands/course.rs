//! Course editing and listing commands

use super::locate;
use course_planner::config::Config;
use course_planner::core::constants::{Grade, Quarter, Severity, WaysCategory, Year};
use course_planner::core::metrics::{grouped_courses, plan_summary};
use course_planner::core::models::Course;
use course_planner::core::state::{Action, Planner};
use course_planner::core::store::{Collection, CourseField};
use course_planner::{error, info};

/// Draft values collected from `add` flags
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// Course code
    pub code: String,
    /// Raw units, clamped on entry
    pub units: i64,
    /// Raw weekly hours, clamped on entry
    pub hours: i64,
    /// Term quarter
    pub quarter: Quarter,
    /// Academic year
    pub year: Year,
    /// Grade
    pub grade: Grade,
    /// WAYS tags
    pub ways: Vec<WaysCategory>,
    /// Add to the backlog instead of the plan
    pub backlog: bool,
}

/// Fill the draft from `request` and submit it.
pub fn add(planner: &mut Planner, request: AddRequest) {
    planner.dispatch(Action::SetDraftCode(request.code.clone()));
    planner.dispatch(Action::SetDraftUnits(request.units));
    planner.dispatch(Action::SetDraftHours(request.hours));
    planner.dispatch(Action::SetDraftQuarter(request.quarter));
    planner.dispatch(Action::SetDraftYear(request.year));
    planner.dispatch(Action::SetDraftGrade(request.grade));
    for way in request.ways {
        if !planner.state().draft.ways.contains(&way) {
            planner.dispatch(Action::ToggleDraftCategory(way));
        }
    }

    let target = if request.backlog {
        Collection::Backlog
    } else {
        Collection::Enrolled
    };
    if !planner.dispatch(Action::AddDraft { target }) {
        eprintln!("✗ Course code must not be blank");
        return;
    }

    if let Some(course) = planner.state().store.collection(target).last() {
        info!("Added {} to {target}", course.code);
        println!("✓ Added {} [{}] to {target}", course.code, course.id);
    }
}

/// Move a course to the other collection.
pub fn move_course(planner: &mut Planner, id: &str, quarter: Option<Quarter>, year: Option<Year>) {
    let (id, from) = match locate(&planner.state().store, id) {
        Ok(found) => found,
        Err(e) => {
            error!("Move failed: {e}");
            eprintln!("{e}");
            return;
        }
    };

    planner.dispatch(Action::Move {
        id: id.clone(),
        from,
        quarter,
        year,
    });
    if let Some((to, course)) = planner.state().store.find(&id) {
        println!(
            "✓ Moved {} to {to} ({} {})",
            course.code, course.quarter, course.year
        );
    }
}

/// Change grade, units or hours of an enrolled course.
pub fn update(planner: &mut Planner, id: &str, field: CourseField, value: &str) {
    let id = match locate(&planner.state().store, id) {
        Ok((id, Collection::Enrolled)) => id,
        Ok((id, Collection::Backlog)) => {
            eprintln!("✗ Course '{id}' is in the backlog; move it into the plan first");
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    planner.dispatch(Action::UpdateField {
        id: id.clone(),
        field,
        value: value.to_string(),
    });
    if let Some((_, course)) = planner.state().store.find(&id) {
        let current = match field {
            CourseField::Grade => course.grade.to_string(),
            CourseField::Units => course.units.to_string(),
            CourseField::Hours => course.hours.to_string(),
        };
        println!("✓ {} {field} = {current}", course.code);
    }
}

/// Toggle a WAYS tag on an enrolled course.
pub fn toggle_way(planner: &mut Planner, id: &str, way: WaysCategory) {
    let id = match locate(&planner.state().store, id) {
        Ok((id, Collection::Enrolled)) => id,
        Ok((id, Collection::Backlog)) => {
            eprintln!("✗ Course '{id}' is in the backlog; move it into the plan first");
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    planner.dispatch(Action::ToggleCategory {
        id: id.clone(),
        way,
    });
    if let Some((_, course)) = planner.state().store.find(&id) {
        let verb = if course.has_way(way) { "Tagged" } else { "Untagged" };
        println!("✓ {verb} {} with {way}", course.code);
    }
}

/// Delete a course from whichever collection holds it.
pub fn remove(planner: &mut Planner, id: &str) {
    let (id, from) = match locate(&planner.state().store, id) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    planner.dispatch(Action::Remove { id: id.clone(), from });
    println!("✓ Removed {id} from {from}");
}

fn course_line(course: &Course) -> String {
    let ways = if course.ways.is_empty() {
        String::new()
    } else {
        let keys: Vec<_> = course.ways.iter().map(|w| w.key()).collect();
        format!(" [{}]", keys.join(", "))
    };
    format!(
        "{:<10} {:<12} {:>2}u {:>3}h  {:<4}{ways}",
        course.id.as_str(),
        course.code,
        course.units,
        course.hours,
        course.grade.label()
    )
}

/// Print the enrolled grid and the backlog.
pub fn list(planner: &Planner) {
    let store = &planner.state().store;

    for group in grouped_courses(store.enrolled()) {
        println!("\n=== {} ===", group.year);
        for (quarter, courses) in &group.quarters {
            println!("  {quarter}:");
            if courses.is_empty() {
                println!("    (none)");
            }
            for course in courses {
                println!("    {}", course_line(course));
            }
        }
    }

    println!("\n=== Backlog ===");
    if store.backlog().is_empty() {
        println!("  (empty)");
    }
    for course in store.backlog() {
        println!(
            "  {}  {} {}",
            course_line(course),
            course.quarter,
            course.year
        );
    }
}

/// Print GPA, unit, WAYS and workload summaries.
pub fn stats(planner: &Planner, config: &Config) {
    let store = &planner.state().store;
    let summary = plan_summary(store.enrolled(), store.backlog(), config.graduation_units());

    println!("\n=== Plan Statistics ===\n");
    println!("Cumulative GPA:   {:.2}", summary.gpa);
    println!(
        "Completed units:  {} / {} ({:.1}%)",
        summary.completed_units,
        summary.graduation_units,
        summary.graduation_percent()
    );
    println!("Planned units:    {}", summary.planned_units);
    println!(
        "Courses:          {} enrolled, {} in backlog",
        summary.enrolled_count, summary.backlog_count
    );

    println!(
        "\nWAYS ({}/{} met):",
        summary.requirements_met(),
        summary.requirements.len()
    );
    for req in &summary.requirements {
        let mark = if req.is_satisfied() { "✓" } else { " " };
        let measure = if req.category.is_unit_weighted() {
            "units"
        } else {
            "courses"
        };
        println!(
            "  {mark} {:<4} {}/{} {measure}  {}",
            req.category.key(),
            req.earned,
            req.required,
            req.category.name()
        );
    }

    if summary.terms.is_empty() {
        return;
    }
    println!("\nTerms:");
    for term in &summary.terms {
        let flag = match term.happiness.severity() {
            Severity::Ok => "",
            Severity::Caution => "  (heavy)",
            Severity::Alert => "  (overloaded)",
        };
        println!(
            "  {:<20} {:>2} units {:>3} hours  GPA {:.2}  {}{flag}",
            term.term.to_string(),
            term.total_units,
            term.total_hours,
            term.gpa,
            term.happiness.emoji_label()
        );
    }
}

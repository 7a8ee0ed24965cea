//! Course model

use crate::core::constants::{
    Grade, Quarter, WaysCategory, Year, DEFAULT_HOURS, DEFAULT_UNITS, MAX_HOURS, MAX_UNITS,
    MIN_HOURS, MIN_UNITS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque course identifier, unique across both collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Wrap an existing identifier (e.g. one typed on the command line).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a short random identifier that `taken` does not already contain.
    #[must_use]
    pub fn generate(taken: impl Fn(&Self) -> bool) -> Self {
        loop {
            let mut raw = uuid::Uuid::new_v4().simple().to_string();
            raw.truncate(8);
            let candidate = Self(raw);
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clamp a unit value into `[MIN_UNITS, MAX_UNITS]`.
#[must_use]
pub fn clamp_units(units: i64) -> u32 {
    clamp_into(units, MIN_UNITS, MAX_UNITS)
}

/// Clamp a weekly hour load into `[MIN_HOURS, MAX_HOURS]`.
#[must_use]
pub fn clamp_hours(hours: i64) -> u32 {
    clamp_into(hours, MIN_HOURS, MAX_HOURS)
}

fn clamp_into(value: i64, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u32::try_from(clamped).unwrap_or(min)
}

/// A planned or completed course.
///
/// Field order matches the export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier assigned when the course was added
    pub id: CourseId,

    /// Course label (e.g., "CS106A")
    pub code: String,

    /// Credit units, within `[1, 20]`
    pub units: u32,

    /// Expected weekly workload in hours, within `[1, 100]`
    pub hours: u32,

    /// Quarter the course is taken in
    pub quarter: Quarter,

    /// Academic year the course is taken in
    pub year: Year,

    /// Letter grade, or "N/A" while ungraded
    pub grade: Grade,

    /// WAYS categories this course satisfies, without duplicates
    #[serde(default)]
    pub ways: Vec<WaysCategory>,
}

impl Course {
    /// Whether this course carries `way`.
    #[must_use]
    pub fn has_way(&self, way: WaysCategory) -> bool {
        self.ways.contains(&way)
    }

    /// Return this course with `way` added if absent, removed if present.
    #[must_use]
    pub fn with_way_toggled(&self, way: WaysCategory) -> Self {
        let mut next = self.clone();
        if next.has_way(way) {
            next.ways.retain(|w| *w != way);
        } else {
            next.ways.push(way);
        }
        next
    }

    /// Bring a course read from outside (saved data, imports) back within the model's invariants:
    /// units and hours clamped, duplicate tags dropped. Well-formed courses come back unchanged.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.units = clamp_units(i64::from(self.units));
        self.hours = clamp_hours(i64::from(self.hours));
        let mut seen = Vec::with_capacity(self.ways.len());
        self.ways.retain(|way| {
            if seen.contains(way) {
                false
            } else {
                seen.push(*way);
                true
            }
        });
        self
    }
}

/// The in-progress "new course" form.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    /// Course label being typed
    pub code: String,
    /// Units, kept within `[1, 20]`
    pub units: u32,
    /// Weekly hours, kept within `[1, 100]`
    pub hours: u32,
    /// Target quarter
    pub quarter: Quarter,
    /// Target academic year
    pub year: Year,
    /// Initial grade
    pub grade: Grade,
    /// Selected WAYS categories
    pub ways: Vec<WaysCategory>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            units: DEFAULT_UNITS,
            hours: DEFAULT_HOURS,
            quarter: Quarter::Autumn,
            year: Year::Freshman,
            grade: Grade::NotGraded,
            ways: Vec::new(),
        }
    }
}

impl CourseDraft {
    /// Start a draft for `code` with every other field at its default.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Whether the draft may be turned into a course (non-blank code).
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.code.trim().is_empty()
    }

    /// Add `way` if absent, remove it if present.
    pub fn toggle_way(&mut self, way: WaysCategory) {
        if self.ways.contains(&way) {
            self.ways.retain(|w| *w != way);
        } else {
            self.ways.push(way);
        }
    }

    /// Build a course from this draft under `id`, or `None` for a blank code.
    #[must_use]
    pub fn build(&self, id: CourseId) -> Option<Course> {
        if !self.is_submittable() {
            return None;
        }
        Some(
            Course {
                id,
                code: self.code.clone(),
                units: self.units,
                hours: self.hours,
                quarter: self.quarter,
                year: self.year,
                grade: self.grade,
                ways: self.ways.clone(),
            }
            .normalized(),
        )
    }
}

//! Data models for `course-planner`

pub mod course;

pub use course::{clamp_hours, clamp_units, Course, CourseDraft, CourseId};

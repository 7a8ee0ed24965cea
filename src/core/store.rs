//! Course record store: the enrolled and backlog collections.
//!
//! Every mutator borrows the current store and returns a new one, so a reader
//! holding the old value never sees a half-applied change.

use crate::core::constants::{Grade, Quarter, WaysCategory, Year};
use crate::core::models::{clamp_hours, clamp_units, Course, CourseDraft, CourseId};
use crate::{debug, warn};
use std::fmt;
use std::str::FromStr;

/// Which of the two collections a course lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Courses placed in a term; counted by every statistic
    Enrolled,
    /// Courses recorded but not scheduled ("unadded")
    Backlog,
}

impl Collection {
    /// The collection a move out of `self` lands in.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Enrolled => Self::Backlog,
            Self::Backlog => Self::Enrolled,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrolled => write!(f, "enrolled"),
            Self::Backlog => write!(f, "backlog"),
        }
    }
}

/// Scalar fields editable in place on an enrolled course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    /// Letter grade
    Grade,
    /// Credit units (clamped to 1..=20)
    Units,
    /// Weekly hours (clamped to 1..=100)
    Hours,
}

impl FromStr for CourseField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grade" => Ok(Self::Grade),
            "units" => Ok(Self::Units),
            "hours" => Ok(Self::Hours),
            _ => Err(format!("Unknown course field: {s}")),
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grade => write!(f, "grade"),
            Self::Units => write!(f, "units"),
            Self::Hours => write!(f, "hours"),
        }
    }
}

/// The two ordered course collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseStore {
    enrolled: Vec<Course>,
    backlog: Vec<Course>,
}

impl CourseStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enrolled: Vec::new(),
            backlog: Vec::new(),
        }
    }

    /// Create a store from already-loaded collections
    #[must_use]
    pub const fn from_collections(enrolled: Vec<Course>, backlog: Vec<Course>) -> Self {
        Self { enrolled, backlog }
    }

    /// Enrolled courses in insertion order
    #[must_use]
    pub fn enrolled(&self) -> &[Course] {
        &self.enrolled
    }

    /// Backlog courses in insertion order
    #[must_use]
    pub fn backlog(&self) -> &[Course] {
        &self.backlog
    }

    /// Courses of one collection
    #[must_use]
    pub fn collection(&self, which: Collection) -> &[Course] {
        match which {
            Collection::Enrolled => &self.enrolled,
            Collection::Backlog => &self.backlog,
        }
    }

    fn collection_mut(&mut self, which: Collection) -> &mut Vec<Course> {
        match which {
            Collection::Enrolled => &mut self.enrolled,
            Collection::Backlog => &mut self.backlog,
        }
    }

    /// Total number of courses in both collections
    #[must_use]
    pub fn len(&self) -> usize {
        self.enrolled.len() + self.backlog.len()
    }

    /// Whether both collections are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enrolled.is_empty() && self.backlog.is_empty()
    }

    /// Find a course by id in either collection
    #[must_use]
    pub fn find(&self, id: &CourseId) -> Option<(Collection, &Course)> {
        [Collection::Enrolled, Collection::Backlog]
            .into_iter()
            .find_map(|which| {
                self.collection(which)
                    .iter()
                    .find(|course| course.id == *id)
                    .map(|course| (which, course))
            })
    }

    /// Whether `id` is used in either collection
    #[must_use]
    pub fn contains_id(&self, id: &CourseId) -> bool {
        self.find(id).is_some()
    }

    /// Add a course built from `draft` to `target` under a fresh id.
    ///
    /// A draft with a blank code leaves the store unchanged.
    #[must_use]
    pub fn add(&self, draft: &CourseDraft, target: Collection) -> Self {
        let id = CourseId::generate(|candidate| self.contains_id(candidate));
        let Some(course) = draft.build(id) else {
            debug!("Ignoring course with blank code");
            return self.clone();
        };

        debug!("Adding {} ({}) to {target}", course.code, course.id);
        let mut next = self.clone();
        next.collection_mut(target).push(course);
        next
    }

    /// Move a course out of `from` into the other collection, optionally re-slotting it.
    ///
    /// `quarter`/`year` overwrite the course's term only when given. An id that is
    /// not in `from` leaves the store unchanged and is reported as a warning.
    #[must_use]
    pub fn move_course(
        &self,
        id: &CourseId,
        from: Collection,
        quarter: Option<Quarter>,
        year: Option<Year>,
    ) -> Self {
        let Some(position) = self.collection(from).iter().position(|c| c.id == *id) else {
            warn!("Cannot move course {id}: not found in {from}");
            return self.clone();
        };

        let mut next = self.clone();
        let mut course = next.collection_mut(from).remove(position);
        if let Some(quarter) = quarter {
            course.quarter = quarter;
        }
        if let Some(year) = year {
            course.year = year;
        }
        let to = from.opposite();
        debug!(
            "Moving {} from {from} to {to} ({} {})",
            course.id, course.quarter, course.year
        );
        next.collection_mut(to).push(course);
        next
    }

    /// Replace one scalar field of an enrolled course from raw input.
    ///
    /// Units and hours are parsed as integers and clamped; unparseable input
    /// (or an unknown id) leaves the store unchanged.
    #[must_use]
    pub fn update_field(&self, id: &CourseId, field: CourseField, value: &str) -> Self {
        let Some(position) = self.enrolled.iter().position(|c| c.id == *id) else {
            debug!("No enrolled course {id} to update");
            return self.clone();
        };

        let mut next = self.clone();
        let course = &mut next.enrolled[position];
        match field {
            CourseField::Grade => match value.parse::<Grade>() {
                Ok(grade) => course.grade = grade,
                Err(e) => {
                    debug!("{e}");
                    return self.clone();
                }
            },
            CourseField::Units | CourseField::Hours => {
                let Ok(raw) = value.trim().parse::<i64>() else {
                    debug!("Ignoring non-numeric {field:?} value '{value}'");
                    return self.clone();
                };
                if field == CourseField::Units {
                    course.units = clamp_units(raw);
                } else {
                    course.hours = clamp_hours(raw);
                }
            }
        }
        next
    }

    /// Add `way` to an enrolled course if absent, remove it if present.
    #[must_use]
    pub fn toggle_category(&self, id: &CourseId, way: WaysCategory) -> Self {
        let Some(position) = self.enrolled.iter().position(|c| c.id == *id) else {
            debug!("No enrolled course {id} to tag with {way}");
            return self.clone();
        };

        let mut next = self.clone();
        next.enrolled[position] = self.enrolled[position].with_way_toggled(way);
        next
    }

    /// Delete a course from `from`; an unknown id is a no-op.
    #[must_use]
    pub fn remove(&self, id: &CourseId, from: Collection) -> Self {
        let mut next = self.clone();
        next.collection_mut(from).retain(|course| course.id != *id);
        next
    }

    /// Replace whole collections; `None` keeps the current one.
    #[must_use]
    pub fn replace(&self, enrolled: Option<Vec<Course>>, backlog: Option<Vec<Course>>) -> Self {
        Self {
            enrolled: enrolled.unwrap_or_else(|| self.enrolled.clone()),
            backlog: backlog.unwrap_or_else(|| self.backlog.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(codes: &[&str], target: Collection) -> CourseStore {
        codes.iter().fold(CourseStore::new(), |store, code| {
            store.add(&CourseDraft::with_code(*code), target)
        })
    }

    fn first_id(store: &CourseStore, which: Collection) -> CourseId {
        store.collection(which)[0].id.clone()
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = store_with(&["CS106A", "MATH51"], Collection::Enrolled);
        let codes: Vec<_> = store.enrolled().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["CS106A", "MATH51"]);
        assert!(store.backlog().is_empty());
    }

    #[test]
    fn test_add_blank_code_is_rejected() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let next = store.add(&CourseDraft::with_code("  "), Collection::Enrolled);
        assert_eq!(next.enrolled().len(), 1);
        assert_eq!(next, store);
    }

    #[test]
    fn test_add_does_not_touch_original() {
        let store = CourseStore::new();
        let next = store.add(&CourseDraft::with_code("CS106A"), Collection::Backlog);
        assert!(store.is_empty());
        assert_eq!(next.backlog().len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = store_with(&["A", "B", "C", "D", "E"], Collection::Enrolled);
        let mut ids: Vec<_> = store.enrolled().iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_move_to_backlog_keeps_identity_and_term() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);
        let store = store.toggle_category(&id, WaysCategory::Fr);

        let moved = store.move_course(&id, Collection::Enrolled, None, None);
        assert!(moved.enrolled().is_empty());
        assert_eq!(moved.backlog().len(), 1);
        let course = &moved.backlog()[0];
        assert_eq!(course.id, id);
        assert_eq!(course.ways, vec![WaysCategory::Fr]);
        assert_eq!(course.quarter, Quarter::Autumn);
        assert_eq!(course.year, Year::Freshman);
    }

    #[test]
    fn test_move_with_target_term() {
        let store = store_with(&["CS107"], Collection::Backlog);
        let id = first_id(&store, Collection::Backlog);

        let moved = store.move_course(
            &id,
            Collection::Backlog,
            Some(Quarter::Spring),
            Some(Year::Junior),
        );
        let (which, course) = moved.find(&id).unwrap();
        assert_eq!(which, Collection::Enrolled);
        assert_eq!(course.quarter, Quarter::Spring);
        assert_eq!(course.year, Year::Junior);
        assert!(moved.backlog().is_empty());
    }

    #[test]
    fn test_move_only_quarter() {
        let store = store_with(&["CS107"], Collection::Backlog);
        let id = first_id(&store, Collection::Backlog);
        let moved = store.move_course(&id, Collection::Backlog, Some(Quarter::Winter), None);
        let course = &moved.enrolled()[0];
        assert_eq!(course.quarter, Quarter::Winter);
        assert_eq!(course.year, Year::Freshman);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);

        // Right id, wrong source collection
        let next = store.move_course(&id, Collection::Backlog, None, None);
        assert_eq!(next, store);

        let next = store.move_course(&CourseId::new("missing"), Collection::Enrolled, None, None);
        assert_eq!(next, store);
    }

    #[test]
    fn test_update_units_and_hours_clamp() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);

        let store = store.update_field(&id, CourseField::Units, "25");
        assert_eq!(store.enrolled()[0].units, 20);
        let store = store.update_field(&id, CourseField::Units, "0");
        assert_eq!(store.enrolled()[0].units, 1);
        let store = store.update_field(&id, CourseField::Hours, " 12 ");
        assert_eq!(store.enrolled()[0].hours, 12);
        let store = store.update_field(&id, CourseField::Hours, "1000");
        assert_eq!(store.enrolled()[0].hours, 100);
    }

    #[test]
    fn test_update_invalid_input_is_noop() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);

        assert_eq!(store.update_field(&id, CourseField::Units, "lots"), store);
        assert_eq!(store.update_field(&id, CourseField::Hours, ""), store);
        assert_eq!(store.update_field(&id, CourseField::Grade, "Z"), store);
    }

    #[test]
    fn test_update_grade() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);
        let store = store.update_field(&id, CourseField::Grade, "A-");
        assert_eq!(store.enrolled()[0].grade, Grade::AMinus);
    }

    #[test]
    fn test_update_ignores_backlog() {
        let store = store_with(&["CS106A"], Collection::Backlog);
        let id = first_id(&store, Collection::Backlog);
        assert_eq!(store.update_field(&id, CourseField::Units, "5"), store);
    }

    #[test]
    fn test_toggle_category_twice() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);

        let once = store.toggle_category(&id, WaysCategory::Ce);
        assert_eq!(once.enrolled()[0].ways, vec![WaysCategory::Ce]);
        let twice = once.toggle_category(&id, WaysCategory::Ce);
        assert_eq!(twice, store);
    }

    #[test]
    fn test_remove() {
        let store = store_with(&["CS106A", "CS106B"], Collection::Enrolled);
        let id = first_id(&store, Collection::Enrolled);

        let next = store.remove(&id, Collection::Enrolled);
        assert_eq!(next.enrolled().len(), 1);
        assert!(!next.contains_id(&id));

        // Wrong collection leaves it alone
        assert_eq!(store.remove(&id, Collection::Backlog), store);
    }

    #[test]
    fn test_replace_keeps_missing_side() {
        let store = store_with(&["CS106A"], Collection::Enrolled);
        let next = store.replace(None, Some(Vec::new()));
        assert_eq!(next.enrolled(), store.enrolled());

        let next = store.replace(Some(Vec::new()), None);
        assert!(next.is_empty());
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("Units".parse::<CourseField>(), Ok(CourseField::Units));
        assert!("code".parse::<CourseField>().is_err());
    }
}

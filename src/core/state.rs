//! Application state and the controller that owns it.
//!
//! [`PlannerState`] is a plain value; [`PlannerState::apply`] is a pure
//! transition. [`Planner`] holds the current state and tells every registered
//! [`StateObserver`] whenever a transition changes the course collections.

use crate::core::constants::{Grade, Quarter, WaysCategory, Year};
use crate::core::models::{clamp_hours, clamp_units, Course, CourseDraft, CourseId};
use crate::core::store::{Collection, CourseField, CourseStore};
use crate::debug;

/// A course picked up for dragging, not yet dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSelection {
    /// Course being dragged
    pub id: CourseId,
    /// Collection it was picked up from
    pub from: Collection,
}

/// Everything the planner can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Turn the current draft into a course in `target`, then reset the draft
    AddDraft {
        /// Collection receiving the new course
        target: Collection,
    },
    /// Move a course to the opposite collection
    Move {
        /// Course to move
        id: CourseId,
        /// Collection it currently lives in
        from: Collection,
        /// New quarter, if any
        quarter: Option<Quarter>,
        /// New academic year, if any
        year: Option<Year>,
    },
    /// Edit a scalar field of an enrolled course from raw input
    UpdateField {
        /// Course to edit
        id: CourseId,
        /// Field to replace
        field: CourseField,
        /// Raw value (parsed and clamped)
        value: String,
    },
    /// Toggle a WAYS tag on an enrolled course
    ToggleCategory {
        /// Course to tag
        id: CourseId,
        /// Category to toggle
        way: WaysCategory,
    },
    /// Delete a course
    Remove {
        /// Course to delete
        id: CourseId,
        /// Collection it lives in
        from: Collection,
    },
    /// Overwrite collections wholesale (import); `None` keeps the current one
    ReplaceCollections {
        /// New enrolled courses
        enrolled: Option<Vec<Course>>,
        /// New backlog courses
        backlog: Option<Vec<Course>>,
    },
    /// Set the draft's code
    SetDraftCode(String),
    /// Set the draft's quarter
    SetDraftQuarter(Quarter),
    /// Set the draft's academic year
    SetDraftYear(Year),
    /// Set the draft's grade
    SetDraftGrade(Grade),
    /// Set the draft's units (clamped)
    SetDraftUnits(i64),
    /// Set the draft's weekly hours (clamped)
    SetDraftHours(i64),
    /// Toggle a WAYS tag on the draft
    ToggleDraftCategory(WaysCategory),
    /// Pick up a course
    BeginDrag {
        /// Course being dragged
        id: CourseId,
        /// Collection it is dragged from
        from: Collection,
    },
    /// Drop the dragged course on a term slot
    DropOn {
        /// Target quarter
        quarter: Quarter,
        /// Target academic year
        year: Year,
    },
    /// Cancel the drag without moving anything
    EndDrag,
}

/// Whole planner state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    /// Enrolled and backlog courses
    pub store: CourseStore,
    /// The "new course" form
    pub draft: CourseDraft,
    /// Course currently being dragged, if any
    pub drag: Option<DragSelection>,
}

impl PlannerState {
    /// Start from hydrated collections with a fresh draft and no drag
    #[must_use]
    pub fn with_store(store: CourseStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    /// Compute the state that follows `action`.
    #[must_use]
    pub fn apply(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::AddDraft { target } => {
                if self.draft.is_submittable() {
                    next.store = self.store.add(&self.draft, target);
                    next.draft = CourseDraft::default();
                } else {
                    debug!("Draft has a blank code; nothing added");
                }
            }
            Action::Move {
                id,
                from,
                quarter,
                year,
            } => next.store = self.store.move_course(&id, from, quarter, year),
            Action::UpdateField { id, field, value } => {
                next.store = self.store.update_field(&id, field, &value);
            }
            Action::ToggleCategory { id, way } => {
                next.store = self.store.toggle_category(&id, way);
            }
            Action::Remove { id, from } => next.store = self.store.remove(&id, from),
            Action::ReplaceCollections { enrolled, backlog } => {
                next.store = self.store.replace(enrolled, backlog);
            }
            Action::SetDraftCode(code) => next.draft.code = code,
            Action::SetDraftQuarter(quarter) => next.draft.quarter = quarter,
            Action::SetDraftYear(year) => next.draft.year = year,
            Action::SetDraftGrade(grade) => next.draft.grade = grade,
            Action::SetDraftUnits(units) => next.draft.units = clamp_units(units),
            Action::SetDraftHours(hours) => next.draft.hours = clamp_hours(hours),
            Action::ToggleDraftCategory(way) => next.draft.toggle_way(way),
            Action::BeginDrag { id, from } => next.drag = Some(DragSelection { id, from }),
            Action::DropOn { quarter, year } => {
                if let Some(selection) = next.drag.take() {
                    next.store = self.store.move_course(
                        &selection.id,
                        selection.from,
                        Some(quarter),
                        Some(year),
                    );
                } else {
                    debug!("Drop on {quarter} {year} with nothing dragged");
                }
            }
            Action::EndDrag => next.drag = None,
        }
        next
    }
}

/// Something that reacts to committed course changes (e.g. persistence).
pub trait StateObserver {
    /// Called with the new state after a transition changed the collections.
    fn on_change(&mut self, state: &PlannerState);
}

/// Owns the current [`PlannerState`] and notifies observers after each change.
#[derive(Default)]
pub struct Planner {
    state: PlannerState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Planner {
    /// Create a controller around an initial state
    #[must_use]
    pub fn new(state: PlannerState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    /// Register an observer; it is not called for the initial state.
    pub fn register_observer(&mut self, observer: Box<dyn StateObserver>) {
        debug!(
            "Registering state observer (total: {})",
            self.observers.len() + 1
        );
        self.observers.push(observer);
    }

    /// Number of registered observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &PlannerState {
        &self.state
    }

    /// Apply `action`. Returns `true` when the course collections changed,
    /// in which case every observer has been notified.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = self.state.apply(action);
        let store_changed = next.store != self.state.store;
        self.state = next;

        if store_changed {
            for observer in &mut self.observers {
                observer.on_change(&self.state);
            }
        }
        store_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingObserver {
        seen: Rc<RefCell<Vec<usize>>>,
    }

    impl StateObserver for CountingObserver {
        fn on_change(&mut self, state: &PlannerState) {
            self.seen.borrow_mut().push(state.store.len());
        }
    }

    fn state_with_course(code: &str, target: Collection) -> PlannerState {
        PlannerState::default()
            .apply(Action::SetDraftCode(code.to_string()))
            .apply(Action::AddDraft { target })
    }

    #[test]
    fn test_add_draft_resets_form() {
        let state = PlannerState::default()
            .apply(Action::SetDraftCode("CS106A".to_string()))
            .apply(Action::SetDraftUnits(5))
            .apply(Action::ToggleDraftCategory(WaysCategory::Fr))
            .apply(Action::AddDraft {
                target: Collection::Enrolled,
            });

        assert_eq!(state.store.enrolled().len(), 1);
        assert_eq!(state.store.enrolled()[0].units, 5);
        assert_eq!(state.store.enrolled()[0].ways, vec![WaysCategory::Fr]);
        assert_eq!(state.draft, CourseDraft::default());
    }

    #[test]
    fn test_add_blank_draft_keeps_draft() {
        let state = PlannerState::default().apply(Action::SetDraftUnits(7));
        let next = state.apply(Action::AddDraft {
            target: Collection::Enrolled,
        });
        assert!(next.store.is_empty());
        assert_eq!(next.draft.units, 7);
    }

    #[test]
    fn test_draft_edits_clamp() {
        let state = PlannerState::default()
            .apply(Action::SetDraftUnits(0))
            .apply(Action::SetDraftHours(500));
        assert_eq!(state.draft.units, 1);
        assert_eq!(state.draft.hours, 100);
    }

    #[test]
    fn test_drag_and_drop_moves_to_term() {
        let state = state_with_course("CS107", Collection::Backlog);
        let id = state.store.backlog()[0].id.clone();

        let dragging = state.apply(Action::BeginDrag {
            id: id.clone(),
            from: Collection::Backlog,
        });
        assert!(dragging.drag.is_some());

        let dropped = dragging.apply(Action::DropOn {
            quarter: Quarter::Winter,
            year: Year::Sophomore,
        });
        assert!(dropped.drag.is_none());
        let (which, course) = dropped.store.find(&id).unwrap();
        assert_eq!(which, Collection::Enrolled);
        assert_eq!(course.quarter, Quarter::Winter);
        assert_eq!(course.year, Year::Sophomore);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let state = state_with_course("CS107", Collection::Backlog);
        let next = state.apply(Action::DropOn {
            quarter: Quarter::Spring,
            year: Year::Senior,
        });
        assert_eq!(next, state);
    }

    #[test]
    fn test_end_drag_clears_selection() {
        let state = state_with_course("CS107", Collection::Enrolled);
        let id = state.store.enrolled()[0].id.clone();
        let next = state
            .apply(Action::BeginDrag {
                id,
                from: Collection::Enrolled,
            })
            .apply(Action::EndDrag);
        assert_eq!(next, state);
    }

    #[test]
    fn test_observers_only_see_store_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut planner = Planner::new(PlannerState::default());
        planner.register_observer(Box::new(CountingObserver { seen: seen.clone() }));
        assert_eq!(planner.observer_count(), 1);

        assert!(!planner.dispatch(Action::SetDraftCode("CS106A".to_string())));
        assert!(planner.dispatch(Action::AddDraft {
            target: Collection::Enrolled,
        }));
        // Blank draft again: no change, no notification
        assert!(!planner.dispatch(Action::AddDraft {
            target: Collection::Enrolled,
        }));

        let id = planner.state().store.enrolled()[0].id.clone();
        assert!(planner.dispatch(Action::Remove {
            id,
            from: Collection::Enrolled,
        }));

        assert_eq!(*seen.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_replace_collections() {
        let state = state_with_course("CS106A", Collection::Enrolled);
        let backlog = state.store.enrolled().to_vec();
        let next = state.apply(Action::ReplaceCollections {
            enrolled: None,
            backlog: Some(backlog),
        });
        assert_eq!(next.store.enrolled().len(), 1);
        assert_eq!(next.store.backlog().len(), 1);
    }
}

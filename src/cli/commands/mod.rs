//! CLI command handlers for `courseplanner`.
//!
//! Each command is implemented in its own submodule. Commands that change
//! courses go through a [`Planner`] whose persistence observer writes the
//! collections back to the configured data directory.

pub mod config;
pub mod course;
pub mod report;
pub mod theme;
pub mod transfer;

use course_planner::config::Config;
use course_planner::core::models::CourseId;
use course_planner::core::persistence::{load_store, FileStore, PersistObserver};
use course_planner::core::state::{Planner, PlannerState};
use course_planner::core::store::{Collection, CourseStore};
use course_planner::{debug, verbose};

/// Key-value store backing the configured data directory
pub fn open_store(config: &Config) -> FileStore {
    FileStore::new(&config.storage.data_dir)
}

/// Hydrate a planner from disk and attach the persistence observer.
pub fn open_planner(config: &Config) -> Planner {
    let kv = open_store(config);
    debug!("Loading courses from {}", kv.dir().display());
    let store = load_store(&kv);
    verbose!(
        "Loaded {} enrolled and {} backlog courses from {}",
        store.enrolled().len(),
        store.backlog().len(),
        kv.dir().display()
    );
    let mut planner = Planner::new(PlannerState::with_store(store));
    planner.register_observer(Box::new(PersistObserver::new(kv)));
    planner
}

/// Which collection holds `id`, or an error message for the user.
pub fn locate(store: &CourseStore, id: &str) -> Result<(CourseId, Collection), String> {
    let id = CourseId::new(id);
    match store.find(&id) {
        Some((collection, _)) => Ok((id, collection)),
        None => Err(format!("✗ No course with id '{id}'")),
    }
}

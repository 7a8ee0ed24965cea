//! Planner core: domain tables, course store, statistics, state and persistence

pub mod constants;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod report;
pub mod state;
pub mod store;

/// Returns the current version of the `course-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Shared library for `course-planner`
//! Course store, statistics and persistence used by the `courseplanner` CLI.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;

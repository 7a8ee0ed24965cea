//! Theme preference command

use super::open_store;
use course_planner::config::Config;
use course_planner::core::persistence::{load_theme, save_theme, Theme};
use course_planner::error;

const fn describe(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}

/// Show the saved theme, or flip it when `toggle` is set.
pub fn run(toggle: bool, config: &Config) {
    let mut kv = open_store(config);
    let current = load_theme(&kv);
    if !toggle {
        println!("{}", describe(current));
        return;
    }

    let next = current.toggled();
    if let Err(e) = save_theme(&mut kv, next) {
        error!("Failed to save theme: {e}");
        eprintln!("✗ Failed to save theme: {e}");
        return;
    }
    println!("✓ Theme set to {}", describe(next));
}

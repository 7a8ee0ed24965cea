//! Export and import of the JSON plan document

use course_planner::config::Config;
use course_planner::core::persistence::{export_json, parse_import};
use course_planner::core::state::Planner;
use course_planner::{error, info};
use std::path::{Path, PathBuf};

/// Run the export command.
///
/// `-` writes to stdout; no path falls back to `storage.export_file`.
pub fn export(planner: &Planner, output: Option<&Path>, pretty: bool, config: &Config) {
    let json = match export_json(&planner.state().store, pretty) {
        Ok(json) => json,
        Err(e) => {
            error!("Export failed: {e}");
            eprintln!("✗ Failed to export courses: {e}");
            return;
        }
    };

    let path = output.map_or_else(|| PathBuf::from(&config.storage.export_file), Path::to_path_buf);
    if path.as_os_str() == "-" {
        println!("{json}");
        return;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("✗ Failed to create {}: {e}", parent.display());
            return;
        }
    }
    match std::fs::write(&path, json) {
        Ok(()) => {
            info!("Exported courses to {}", path.display());
            println!("✓ Exported plan to {}", path.display());
        }
        Err(e) => {
            error!("Export to {} failed: {e}", path.display());
            eprintln!("✗ Failed to write {}: {e}", path.display());
        }
    }
}

/// Run the import command.
///
/// A document that does not parse leaves the saved courses untouched.
pub fn import(planner: &mut Planner, input_file: &Path) {
    let text = match std::fs::read_to_string(input_file) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read {}: {e}", input_file.display());
            eprintln!("✗ Failed to read {}: {e}", input_file.display());
            return;
        }
    };

    let patch = match parse_import(&text) {
        Ok(patch) => patch,
        Err(e) => {
            error!("Import of {} rejected: {e}", input_file.display());
            eprintln!("✗ Invalid file format: {e}");
            return;
        }
    };

    let enrolled = patch.enrolled.as_ref().map(Vec::len);
    let backlog = patch.backlog.as_ref().map(Vec::len);
    planner.dispatch(patch.into_action());

    info!("Imported {}", input_file.display());
    println!("✓ Imported {}", input_file.display());
    if let Some(count) = enrolled {
        println!("  enrolled: {count} courses");
    }
    if let Some(count) = backlog {
        println!("  backlog:  {count} courses");
    }
}

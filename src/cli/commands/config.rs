//! `config` command: show and edit `[logging]`, `[storage]` and `[planner]` keys

use crate::args::ConfigSubcommand;
use course_planner::config::Config;
use course_planner::logger::Level;
use course_planner::{error, info};
use std::io::{self, BufRead, Write};

/// Every settable key with the section it lives in, in display order.
const KEYS: [(&str, &str); 6] = [
    ("level", "logging"),
    ("file", "logging"),
    ("verbose", "logging"),
    ("data_dir", "storage"),
    ("export_file", "storage"),
    ("graduation_units", "planner"),
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            let notes = match apply_set(config, &key, &value) {
                Ok(notes) => notes,
                Err(e) => fail(&e),
            };
            persist(config);
            for line in notes {
                println!("{line}");
            }
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let notes = match apply_unset(config, defaults, &key) {
                Ok(notes) => notes,
                Err(e) => fail(&e),
            };
            persist(config);
            for line in notes {
                println!("{line}");
            }
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}

fn persist(config: &Config) {
    if let Err(e) = config.save() {
        error!("Failed to save config: {e}");
        fail(&format!("Failed to save config: {e}"));
    }
}

/// Canonical key (`data-dir` → `data_dir`) and its section, if known.
fn lookup(key: &str) -> Option<(&'static str, &'static str)> {
    let wanted = key.trim().replace('-', "_");
    KEYS.into_iter().find(|(name, _)| *name == wanted)
}

fn unknown_key(key: &str) -> String {
    let known: Vec<_> = KEYS.iter().map(|(name, _)| *name).collect();
    format!("Unknown config key: '{key}' (known: {})", known.join(", "))
}

fn show(config: &Config, key: Option<&str>) {
    let Some(key) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\nFile: {}", Config::get_config_file_path().display());
        return;
    };
    match config.get(key) {
        Some(value) => println!("{value}"),
        None => eprintln!("✗ {}", unknown_key(key)),
    }
}

/// Set `key` in memory and return the lines to show once it has been saved.
fn apply_set(config: &mut Config, key: &str, value: &str) -> Result<Vec<String>, String> {
    let (name, section) = lookup(key).ok_or_else(|| unknown_key(key))?;
    if name == "level" && Level::parse(value).is_none() {
        return Err(format!(
            "Invalid log level '{value}' (expected error, warn, info or debug)"
        ));
    }

    let previous_dir = config.storage.data_dir.clone();
    config.set(name, value)?;
    info!("Config [{section}] {name} set to {value}");

    let mut notes = vec![format!("✓ [{section}] {name} = {value}")];
    if name == "data_dir" && previous_dir != config.storage.data_dir {
        notes.push(moved_data_note(&previous_dir, &config.storage.data_dir));
    }
    Ok(notes)
}

/// Restore `key` to its default and return the lines to show once saved.
fn apply_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<Vec<String>, String> {
    let (name, section) = lookup(key).ok_or_else(|| unknown_key(key))?;

    let previous_dir = config.storage.data_dir.clone();
    config.unset(name, defaults)?;
    let value = config.get(name).unwrap_or_default();

    let mut notes = vec![format!("✓ [{section}] {name} reset to default ({value})")];
    if name == "data_dir" && previous_dir != config.storage.data_dir {
        notes.push(moved_data_note(&previous_dir, &config.storage.data_dir));
    }
    Ok(notes)
}

fn moved_data_note(from: &str, to: &str) -> String {
    format!(
        "  Saved courses are not moved: copy the *.json files from {from} to {to} to keep them."
    )
}

/// Whether an answer to a y/n prompt is a yes.
fn confirmed(input: &mut impl BufRead) -> bool {
    let mut response = String::new();
    if input.read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Reset config to defaults? Saved courses are kept. (y/n): ");
    io::stdout().flush().ok();

    if !confirmed(&mut io::stdin().lock()) {
        println!("✗ Reset cancelled");
        return;
    }
    if let Err(e) = Config::reset() {
        fail(&format!("Failed to remove config file: {e}"));
    }
    println!("✓ Config reset to defaults");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_accepts_dashed_keys() {
        assert_eq!(lookup("data-dir"), Some(("data_dir", "storage")));
        assert_eq!(
            lookup("graduation_units"),
            Some(("graduation_units", "planner"))
        );
        assert_eq!(lookup("token"), None);
    }

    #[test]
    fn test_set_reports_section() {
        let mut config = Config::from_defaults();
        let notes = apply_set(&mut config, "graduation-units", "186").unwrap();
        assert_eq!(notes, vec!["✓ [planner] graduation_units = 186".to_string()]);
        assert_eq!(config.graduation_units(), 186);
    }

    #[test]
    fn test_set_data_dir_warns_courses_stay() {
        let mut config = Config::from_defaults();
        let notes = apply_set(&mut config, "data_dir", "/srv/plans").unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].starts_with("✓ [storage] data_dir"));
        assert!(notes[1].contains("not moved"));
        assert!(notes[1].contains("/srv/plans"));
    }

    #[test]
    fn test_set_rejects_unknown_level_and_key() {
        let mut config = Config::from_defaults();
        let before = config.logging.level.clone();
        assert!(apply_set(&mut config, "level", "loud").is_err());
        assert_eq!(config.logging.level, before);
        assert!(apply_set(&mut config, "endpoint", "x")
            .unwrap_err()
            .contains("known: level"));
    }

    #[test]
    fn test_unset_restores_default() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_defaults();
        config.set("data_dir", "/elsewhere").unwrap();

        let notes = apply_unset(&mut config, &defaults, "data_dir").unwrap();
        assert_eq!(config.storage.data_dir, defaults.storage.data_dir);
        assert!(notes[0].starts_with("✓ [storage] data_dir reset to default"));
        assert!(notes[1].contains("/elsewhere"));
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed(&mut "y\n".as_bytes()));
        assert!(confirmed(&mut " YES \n".as_bytes()));
        assert!(!confirmed(&mut "n\n".as_bytes()));
        assert!(!confirmed(&mut "".as_bytes()));
    }
}

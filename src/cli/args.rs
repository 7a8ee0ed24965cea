//! CLI argument definitions for `courseplanner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_planner::config::ConfigOverrides;
use course_planner::core::constants::{Grade, Quarter, WaysCategory, Year};
use course_planner::core::store::CourseField;
use course_planner::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Add a course to the plan (or to the backlog with --backlog).
    Add {
        /// Course code, e.g. CS106A
        #[arg(value_name = "CODE")]
        code: String,

        /// Credit units (1-20)
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        units: i64,

        /// Expected weekly hours (1-100)
        #[arg(long, default_value_t = 9, allow_negative_numbers = true)]
        hours: i64,

        /// Quarter: Autumn, Winter, Spring or Summer
        #[arg(short, long, default_value = "Autumn")]
        quarter: Quarter,

        /// Academic year: 1-4 or Freshman..Senior
        #[arg(short, long, default_value = "1")]
        year: Year,

        /// Grade, e.g. A-, B+, N/A
        #[arg(short, long, default_value = "N/A")]
        grade: Grade,

        /// WAYS category (repeatable), e.g. --way SI --way CE
        #[arg(short, long = "way", value_name = "WAY")]
        ways: Vec<WaysCategory>,

        /// Record in the backlog instead of enrolling
        #[arg(long)]
        backlog: bool,
    },
    /// Move a course between the plan and the backlog.
    ///
    /// Optionally re-slot it into a different quarter and/or year.
    Move {
        /// Course id (see `list`)
        #[arg(value_name = "ID")]
        id: String,

        /// New quarter
        #[arg(short, long)]
        quarter: Option<Quarter>,

        /// New academic year
        #[arg(short, long)]
        year: Option<Year>,
    },
    /// Change the grade, units or hours of an enrolled course.
    Set {
        /// Course id (see `list`)
        #[arg(value_name = "ID")]
        id: String,

        /// Field to change: grade, units or hours
        #[arg(value_name = "FIELD")]
        field: CourseField,

        /// New value (units and hours are clamped to their ranges)
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },
    /// Toggle a WAYS category on an enrolled course.
    Way {
        /// Course id (see `list`)
        #[arg(value_name = "ID")]
        id: String,

        /// WAYS category key, e.g. SI
        #[arg(value_name = "WAY")]
        way: WaysCategory,
    },
    /// Delete a course.
    Remove {
        /// Course id (see `list`)
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List courses by year and quarter, then the backlog.
    List,
    /// Show GPA, completed units, WAYS progress and term workload.
    Stats,
    /// Write a plan report.
    Report {
        /// Output file path (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Report heading
        #[arg(long, default_value = "Course Plan")]
        title: String,
    },
    /// Export the plan as a JSON document.
    Export {
        /// Output file path (defaults to config `export_file`; `-` for stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Indent the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Import a JSON document, replacing the collections it contains.
    Import {
        /// Path to the exported document
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Show or toggle the dark-mode preference.
    Theme {
        /// Flip the saved preference
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "courseplanner",
    about = "Quarter-by-quarter course planner with GPA, WAYS and workload tracking",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the data directory holding saved courses
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            data_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare(Command::List).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut cli = bare(Command::Stats);
        cli.config_level = Some(LogLevelArg::Debug);
        cli.config_log_file = Some(PathBuf::from("/tmp/planner.log"));
        cli.config_verbose = Some(true);
        cli.data_dir = Some(PathBuf::from("/tmp/planner-data"));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("debug"));
        assert_eq!(overrides.file.as_deref(), Some("/tmp/planner.log"));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir.as_deref(), Some("/tmp/planner-data"));
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "courseplanner",
            "add",
            "CS106A",
            "--units",
            "5",
            "--quarter",
            "winter",
            "--year",
            "2",
            "--grade",
            "A-",
            "--way",
            "AQR",
            "--way",
            "fr",
        ])
        .unwrap();

        let Command::Add {
            code,
            units,
            quarter,
            year,
            grade,
            ways,
            backlog,
            ..
        } = cli.command
        else {
            panic!("expected add");
        };
        assert_eq!(code, "CS106A");
        assert_eq!(units, 5);
        assert_eq!(quarter, Quarter::Winter);
        assert_eq!(year, Year::Sophomore);
        assert_eq!(grade, Grade::AMinus);
        assert_eq!(ways, vec![WaysCategory::Aqr, WaysCategory::Fr]);
        assert!(!backlog);
    }

    #[test]
    fn test_parse_set_command() {
        let cli = Cli::try_parse_from(["courseplanner", "set", "abc123", "units", "7"]).unwrap();
        let Command::Set { id, field, value } = cli.command else {
            panic!("expected set");
        };
        assert_eq!(id, "abc123");
        assert_eq!(field, CourseField::Units);
        assert_eq!(value, "7");
    }

    #[test]
    fn test_parse_rejects_unknown_way() {
        assert!(Cli::try_parse_from(["courseplanner", "way", "abc", "XYZ"]).is_err());
    }
}

//! Command-line interface entry point for `courseplanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::course::AddRequest;
use course_planner::config::Config;
use course_planner::info;
use course_planner::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Theme { toggle } => commands::theme::run(toggle, &config),
        command => run_planner_command(command, &config),
    }
}

/// Commands that load the saved courses and may change them
fn run_planner_command(command: Command, config: &Config) {
    let mut planner = commands::open_planner(config);
    match command {
        Command::Add {
            code,
            units,
            hours,
            quarter,
            year,
            grade,
            ways,
            backlog,
        } => commands::course::add(
            &mut planner,
            AddRequest {
                code,
                units,
                hours,
                quarter,
                year,
                grade,
                ways,
                backlog,
            },
        ),
        Command::Move { id, quarter, year } => {
            commands::course::move_course(&mut planner, &id, quarter, year);
        }
        Command::Set { id, field, value } => {
            commands::course::update(&mut planner, &id, field, &value);
        }
        Command::Way { id, way } => commands::course::toggle_way(&mut planner, &id, way),
        Command::Remove { id } => commands::course::remove(&mut planner, &id),
        Command::List => commands::course::list(&planner),
        Command::Stats => commands::course::stats(&planner, config),
        Command::Report {
            output,
            format,
            title,
        } => commands::report::run(&planner, output.as_deref(), &format, &title, config),
        Command::Export { output, pretty } => {
            commands::transfer::export(&planner, output.as_deref(), pretty, config);
        }
        Command::Import { input_file } => commands::transfer::import(&mut planner, &input_file),
        Command::Config { .. } | Command::Theme { .. } => {}
    }
}

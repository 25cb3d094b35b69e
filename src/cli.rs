use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Task list to start from instead of the bundled one.
    pub data: Option<PathBuf>,
    pub empty: bool,
    pub log_file: Option<PathBuf>,
    pub verbose: u8,
}

pub fn command() -> Command {
    Command::new("todos")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal to-do list with sorting, searching and grouping")
        .arg(
            Arg::new("data")
                .long("data")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file with the tasks to start from"),
        )
        .arg(
            Arg::new("empty")
                .long("empty")
                .action(ArgAction::SetTrue)
                .conflicts_with("data")
                .help("Start with an empty list"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Write logs to this file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Raise the log level (repeatable)"),
        )
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            data: matches.get_one::<PathBuf>("data").cloned(),
            empty: matches.get_flag("empty"),
            log_file: matches.get_one::<PathBuf>("log-file").cloned(),
            verbose: matches.get_count("verbose"),
        }
    }

    fn default_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Sends `tracing` output to the configured log file. Without one nothing is
/// installed, since the terminal belongs to the UI.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_level()))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        command()
            .try_get_matches_from(args)
            .map(|m| Config::from_matches(&m))
    }

    #[test]
    fn defaults() {
        let config = parse(&["todos"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_level(), "warn");
    }

    #[test]
    fn flags_parse() {
        let config = parse(&["todos", "--data", "seed.json", "--log-file", "todos.log", "-vv"]).unwrap();
        assert_eq!(config.data, Some(PathBuf::from("seed.json")));
        assert_eq!(config.log_file, Some(PathBuf::from("todos.log")));
        assert_eq!(config.verbose, 2);
        assert_eq!(config.default_level(), "debug");
    }

    #[test]
    fn empty_conflicts_with_data() {
        assert!(parse(&["todos", "--empty", "--data", "seed.json"]).is_err());
        assert!(parse(&["todos", "--empty"]).unwrap().empty);
    }

    #[test]
    fn tracing_writes_to_the_log_file() {
        let dir = tempdir().unwrap();
        let config = Config {
            log_file: Some(dir.path().join("todos.log")),
            ..Config::default()
        };
        init_tracing(&config).unwrap();
        assert!(dir.path().join("todos.log").exists());
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let config = Config {
            log_file: Some(PathBuf::from("/nonexistent/dir/todos.log")),
            ..Config::default()
        };
        let err = init_tracing(&config).unwrap_err();
        assert!(err.to_string().contains("failed to create log file"));
    }
}

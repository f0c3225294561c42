use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use super::config::{AppConfig, ConfigError};
use super::logging::LogDestination;

/// Track an asynchronous image-processing task until it finishes.
#[derive(Debug, Parser)]
#[command(name = "task-tracker", version)]
pub struct Cli {
    /// Task id to track. Defaults to the last remembered task.
    pub task_id: Option<String>,

    /// Base URL of the processing server (overrides the config file).
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// RON configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the remembered task id.
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Stay attached after the task settles and keep accepting commands.
    #[arg(long)]
    pub watch: bool,

    /// Also write logs to ./tracker.log.
    #[arg(long)]
    pub log_file: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        if let Some(server) = &self.server {
            config.server_url = server.clone();
        }
        if let Some(dir) = &self.state_dir {
            config.state_dir = dir.clone();
        }
        Ok(config)
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::Both
        } else {
            LogDestination::Terminal
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "task-tracker",
            "abc",
            "--server",
            "http://example.test:9000",
            "--state-dir",
            "/tmp/tracker",
            "--watch",
        ])
        .unwrap();

        assert_eq!(cli.task_id.as_deref(), Some("abc"));
        assert!(cli.watch);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.server_url, "http://example.test:9000");
        assert_eq!(config.state_dir, PathBuf::from("/tmp/tracker"));
        assert_eq!(config.recheck_delay_secs, 60);
    }

    #[test]
    fn task_id_is_optional() {
        let cli = Cli::try_parse_from(["task-tracker", "-v"]).unwrap();
        assert_eq!(cli.task_id, None);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        assert!(matches!(cli.log_destination(), LogDestination::Terminal));
    }
}

pub mod commands;
pub mod host;
pub mod utils;

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

use css_module_companion::config::LoggingConfig;
use css_module_companion::host::fs::FsStorage;
use css_module_companion::Config;

use utils::OutputFormat;

/// Everything a subcommand needs, resolved from global arguments.
pub struct CliContext {
    pub root: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
    pub assume_yes: bool,
}

impl CliContext {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = matches
            .get_one::<PathBuf>("root")
            .map(|root| absolutize(&cwd, root))
            .unwrap_or(cwd);

        let config = Config::load_from_dir(&root)
            .with_context(|| format!("failed to load configuration from {}", root.display()))?
            .with_overrides(
                matches.get_one::<String>("file-extension").map(String::as_str),
                matches.get_one::<String>("import-name").map(String::as_str),
            );
        config.validate()?;

        let format = matches
            .get_one::<String>("format")
            .map(|f| f.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            root,
            config,
            format,
            assume_yes: matches.get_flag("yes"),
        })
    }

    pub fn storage(&self) -> FsStorage {
        FsStorage::new(&self.root)
    }

    /// Native path for a file argument given relative to the working
    /// directory.
    pub fn resolve_arg(&self, file: &Path) -> Result<PathBuf> {
        Ok(absolutize(&std::env::current_dir()?, file))
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays
/// usable by scripts; RUST_LOG takes precedence over the configured level.
pub fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        match logging.level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            other => {
                eprintln!("Invalid log level '{}', falling back to WARN", other);
                tracing::Level::WARN
            }
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match logging.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "pretty" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

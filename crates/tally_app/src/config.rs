//! Defaults loaded from a RON file, overridden by command-line flags.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use tally_core::Order;
use tally_engine::ReportFormat;

use crate::cli::{Cli, Command};
use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = ".tally.ron";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub order: Order,
    pub format: ReportFormat,
    pub log_destination: LogDestination,
    pub log_level: Option<String>,
}

/// Load `explicit` if given, else `.tally.ron` from the working directory.
///
/// An explicit file must exist and parse. The default file is optional, and a
/// malformed one is reported and ignored.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(load_default(Path::new(DEFAULT_CONFIG_FILENAME))),
    }
}

fn load_default(path: &Path) -> FileConfig {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return FileConfig::default(),
        Err(err) => {
            // The logger is not up yet.
            eprintln!("Warning: Could not read {:?}: {}", path, err);
            return FileConfig::default();
        }
    };
    match parse(&text) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: Ignoring malformed {:?}: {}", path, err);
            FileConfig::default()
        }
    }
}

fn parse(text: &str) -> Result<FileConfig> {
    Ok(ron::from_str(text)?)
}

/// Effective settings after applying CLI overrides on top of the file config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub order: Order,
    pub format: ReportFormat,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &FileConfig) -> Self {
        let (order, format) = match &cli.command {
            Command::Count(args) => (
                args.order.map(Order::from).unwrap_or(config.order),
                args.format.map(ReportFormat::from).unwrap_or(config.format),
            ),
            Command::Lookup(_) | Command::Verify(_) => (config.order, config.format),
        };

        let log_level = if cli.verbose {
            LevelFilter::Debug
        } else {
            config
                .log_level
                .as_deref()
                .and_then(tally_logging::parse_level)
                .unwrap_or(LevelFilter::Info)
        };

        Self {
            order,
            format,
            log_destination: cli.log.map(LogDestination::from).unwrap_or(config.log_destination),
            log_level,
        }
    }
}

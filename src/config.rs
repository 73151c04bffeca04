//! Configuration management for the markup validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file
//! - Merging both into a `Config`

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::service::transport::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::service::HttpSettings;
use crate::validation::ignore::load_messages;
use crate::validation::{ContextWindow, IgnoreSet};

/// Command-line arguments for the markup validator
#[derive(Debug, Parser)]
#[command(name = "markup-validate")]
#[command(about = "Validate HTML documents against a remote markup validator")]
#[command(version)]
pub struct Args {
    /// Files to validate; none or `-` reads stdin
    pub files: Vec<PathBuf>,

    #[arg(long, help = "Validation service endpoint")]
    pub endpoint: Option<String>,

    #[arg(
        long = "ignore",
        value_name = "MESSAGE",
        help = "Error message to ignore (repeatable)"
    )]
    pub ignore: Vec<String>,

    #[arg(long, help = "File with one error message to ignore per line")]
    pub ignore_file: Option<PathBuf>,

    #[arg(long, help = "Config file (default: <config dir>/markup-validate/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "SECONDS", help = "Request timeout")]
    pub timeout: Option<u64>,

    /// Log level for the validator
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of the TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Validation service endpoint
    pub endpoint: Option<String>,
    /// User agent override
    pub user_agent: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Messages to ignore
    #[serde(default)]
    pub ignore: Vec<String>,
    pub context: Option<ContextSection>,
}

/// `[context]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContextSection {
    pub line_offset: Option<usize>,
    pub lead: Option<usize>,
    pub trail: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Documents to validate; empty means stdin
    pub files: Vec<PathBuf>,
    /// Validation service endpoint
    pub endpoint: String,
    /// User agent sent with each request
    pub user_agent: String,
    /// Request timeout, none by default
    pub timeout: Option<Duration>,
    /// Messages from the file, the ignore file and the command line
    pub ignore: IgnoreSet,
    /// Snippet shape for error context
    pub window: ContextWindow,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::merge(args, file)
    }

    /// Command-line values win over the file; ignore lists are combined
    pub fn merge(args: Args, file: FileConfig) -> Result<Self> {
        let mut ignore = file.ignore;
        if let Some(path) = &args.ignore_file {
            ignore.extend(load_messages(path)?);
        }
        ignore.extend(args.ignore);

        let defaults = ContextWindow::default();
        let context = file.context.unwrap_or_default();
        let window = ContextWindow {
            line_offset: context.line_offset.unwrap_or(defaults.line_offset),
            lead: context.lead.unwrap_or(defaults.lead),
            trail: context.trail.unwrap_or(defaults.trail),
        };

        Ok(Config {
            files: args.files,
            endpoint: args
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: args.timeout.or(file.timeout_secs).map(Duration::from_secs),
            ignore: IgnoreSet::new(ignore),
            window,
            log_level: args.log_level,
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
        }
    }
}

/// `<config dir>/markup-validate/config.toml`, if a config dir exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("markup-validate").join("config.toml"))
}

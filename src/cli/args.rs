use crate::domain::config::CalcConfig;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments for SerialCalc
#[derive(Parser, Debug)]
#[command(
    name = "serialcalc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Interactive calculator client for a serial-attached device",
    long_about = "Reads arithmetic expressions from the terminal, forwards each one as a line over a serial link to a calculator device, and reports the classified result. Every completed exchange is appended to an activity log."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress diagnostic logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format for non-interactive commands
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Serial device path (overrides configuration)
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Baud rate (overrides configuration)
    #[arg(short, long, global = true)]
    pub baud: Option<u32>,

    /// Activity log file (overrides configuration)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Seconds of inactivity before the session ends (overrides configuration)
    #[arg(long, global = true)]
    pub idle_timeout: Option<u64>,

    /// Command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive calculator session
    Run,
    /// List available serial ports
    Ports,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<String>,
    },
    /// Create default configuration
    Init {
        /// Directory to create the project configuration in
        #[arg(long)]
        dir: Option<String>,
        /// Write the global configuration instead
        #[arg(short, long)]
        global: bool,
    },
}

impl Args {
    /// Apply command line overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut CalcConfig) {
        if let Some(port) = &self.port {
            config.device.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.device.baud_rate = baud;
        }
        if let Some(log_file) = &self.log_file {
            config.session.log_file = log_file.clone();
        }
        if let Some(idle_timeout) = self.idle_timeout {
            config.session.idle_timeout_secs = idle_timeout;
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

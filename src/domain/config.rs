use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// SerialCalc configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Serial device the calculator is attached to
    #[serde(default)]
    pub device: DeviceConfig,
    /// Read/write timeout policy
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Interactive session settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Diagnostic log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Serial device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device path or COM port name
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
    #[serde(default)]
    pub parity: ParityConfig,
    #[serde(default)]
    pub flow_control: FlowControlConfig,
}

/// Parity configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParityConfig {
    #[default]
    None,
    Odd,
    Even,
}

/// Flow control configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowControlConfig {
    #[default]
    None,
    Hardware,
    Software,
}

/// Timeout policy for device I/O, all values in milliseconds.
///
/// A read may wait `read_constant_ms + read_multiplier_ms * n` in total for
/// `n` requested bytes, and at most `interval_ms` between two bytes once the
/// first one arrived. Writes get `write_constant_ms + write_multiplier_ms * n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_constant_ms")]
    pub read_constant_ms: u64,
    #[serde(default = "default_multiplier_ms")]
    pub read_multiplier_ms: u64,
    #[serde(default = "default_constant_ms")]
    pub write_constant_ms: u64,
    #[serde(default = "default_multiplier_ms")]
    pub write_multiplier_ms: u64,
}

/// Interactive session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds without a completed input before the session ends
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// Append-only activity log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl TimeoutConfig {
    /// Maximum silence between two received bytes
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Total budget for reading `bytes` bytes
    pub fn read_total(&self, bytes: usize) -> Duration {
        Duration::from_millis(
            self.read_multiplier_ms
                .saturating_mul(bytes as u64)
                .saturating_add(self.read_constant_ms),
        )
    }

    /// Total budget for writing `bytes` bytes
    pub fn write_total(&self, bytes: usize) -> Duration {
        Duration::from_millis(
            self.write_multiplier_ms
                .saturating_mul(bytes as u64)
                .saturating_add(self.write_constant_ms),
        )
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_port() -> String {
    if cfg!(windows) {
        "COM11".to_string()
    } else {
        "/dev/ttyACM0".to_string()
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_data_bits() -> u8 {
    8
}

fn default_stop_bits() -> u8 {
    1
}

fn default_interval_ms() -> u64 {
    50
}

fn default_constant_ms() -> u64 {
    50
}

fn default_multiplier_ms() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_log_file() -> PathBuf {
    PathBuf::from("calculator_log.txt")
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            stop_bits: default_stop_bits(),
            parity: ParityConfig::default(),
            flow_control: FlowControlConfig::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            read_constant_ms: default_constant_ms(),
            read_multiplier_ms: default_multiplier_ms(),
            write_constant_ms: default_constant_ms(),
            write_multiplier_ms: default_multiplier_ms(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            log_file: default_log_file(),
        }
    }
}

use crate::cli::args::OutputFormat;
use crate::domain::config::CalcConfig;
use serde::Serialize;
use std::io;

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_ports(&self, ports: &[PortSummary]) -> Result<(), OutputError>;
    fn write_config(&self, config: &CalcConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::SerialCalcError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Serial port entry as listed by the `ports` command
#[derive(Debug, Clone, Serialize)]
pub struct PortSummary {
    pub name: String,
    pub kind: String,
}

impl From<serialport::SerialPortInfo> for PortSummary {
    fn from(info: serialport::SerialPortInfo) -> Self {
        let kind = match info.port_type {
            serialport::SerialPortType::UsbPort(usb) => match usb.product {
                Some(product) => format!("usb ({})", product),
                None => format!("usb ({:04x}:{:04x})", usb.vid, usb.pid),
            },
            serialport::SerialPortType::PciPort => "pci".to_string(),
            serialport::SerialPortType::BluetoothPort => "bluetooth".to_string(),
            serialport::SerialPortType::Unknown => "unknown".to_string(),
        };

        Self {
            name: info.port_name,
            kind,
        }
    }
}

/// Console output writer for one-shot commands
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_ports(&self, ports: &[PortSummary]) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                if ports.is_empty() {
                    println!("No serial ports found");
                }
                for port in ports {
                    println!("  {:<24} {}", port.name, port.kind);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(ports)?);
            }
        }
        Ok(())
    }

    fn write_config(&self, config: &CalcConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => print!("{}", toml::to_string_pretty(config)?),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "message": message }));
            }
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", error),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({ "error": error }));
            }
        }
        Ok(())
    }
}

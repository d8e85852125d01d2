use thiserror::Error;

/// SerialCalc unified error type
#[derive(Error, Debug)]
pub enum SerialCalcError {
    #[error("Serial device '{path}' could not be opened: {source}")]
    DeviceNotFound {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Failed to configure serial device: {message}")]
    Configure { message: String },

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to send request: {message}")]
    Send { message: String },

    #[error("Failed to receive response: {message}")]
    Receive { message: String },

    #[error("No response received from device")]
    NoResponse,

    #[error("Device not connected")]
    DeviceNotConnected,

    #[error("Input too long (max {max} characters)")]
    InputTooLong { max: usize },

    #[error("Failed to open activity log '{path}': {source}")]
    LogOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {0}")]
    Output(String),
}

pub type SerialCalcResult<T> = Result<T, SerialCalcError>;

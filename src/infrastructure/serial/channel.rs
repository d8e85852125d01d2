use crate::core::communication::DeviceLink;
use crate::core::session::request::Request;
use crate::domain::config::{DeviceConfig, FlowControlConfig, ParityConfig, TimeoutConfig};
use crate::domain::error::{SerialCalcError, SerialCalcResult};
use async_trait::async_trait;
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Baud rate used only while opening; `configure` applies the real one.
const OPEN_BAUD_RATE: u32 = 9600;

/// Serial connection that is open but not yet configured
pub struct OpenPort {
    port: Box<dyn SerialPort>,
    path: String,
}

/// Configured serial connection to the calculator device
pub struct SerialChannel {
    port: Option<Box<dyn SerialPort>>,
    path: String,
    timeouts: TimeoutConfig,
}

impl SerialChannel {
    /// Open the device handle at `path`.
    pub fn open(path: &str) -> SerialCalcResult<OpenPort> {
        let port = serialport::new(path, OPEN_BAUD_RATE)
            .open()
            .map_err(|source| SerialCalcError::DeviceNotFound {
                path: path.to_string(),
                source,
            })?;

        info!("Serial port '{}' opened", path);

        Ok(OpenPort {
            port,
            path: path.to_string(),
        })
    }

    async fn with_port<T, F>(&mut self, op: F) -> SerialCalcResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn SerialPort, &TimeoutConfig) -> SerialCalcResult<T> + Send + 'static,
    {
        let mut port = self.port.take().ok_or(SerialCalcError::DeviceNotConnected)?;
        let timeouts = self.timeouts.clone();

        let (port, result) = tokio::task::spawn_blocking(move || {
            let result = op(port.as_mut(), &timeouts);
            (port, result)
        })
        .await
        .map_err(|e| SerialCalcError::Io(io::Error::new(io::ErrorKind::Other, e)))?;

        self.port = Some(port);
        result
    }
}

impl OpenPort {
    /// Apply line parameters and the timeout policy.
    pub fn configure(
        mut self,
        device: &DeviceConfig,
        timeouts: TimeoutConfig,
    ) -> SerialCalcResult<SerialChannel> {
        let data_bits = match device.data_bits {
            5 => serialport::DataBits::Five,
            6 => serialport::DataBits::Six,
            7 => serialport::DataBits::Seven,
            8 => serialport::DataBits::Eight,
            other => {
                return Err(SerialCalcError::Configure {
                    message: format!("Invalid data bits: {}", other),
                })
            }
        };

        let stop_bits = match device.stop_bits {
            1 => serialport::StopBits::One,
            2 => serialport::StopBits::Two,
            other => {
                return Err(SerialCalcError::Configure {
                    message: format!("Invalid stop bits: {}", other),
                })
            }
        };

        let parity = match device.parity {
            ParityConfig::None => serialport::Parity::None,
            ParityConfig::Even => serialport::Parity::Even,
            ParityConfig::Odd => serialport::Parity::Odd,
        };

        let flow_control = match device.flow_control {
            FlowControlConfig::None => serialport::FlowControl::None,
            FlowControlConfig::Software => serialport::FlowControl::Software,
            FlowControlConfig::Hardware => serialport::FlowControl::Hardware,
        };

        let current = self
            .port
            .baud_rate()
            .map_err(|e| configure_error("query current parameters", e))?;
        debug!("Serial port '{}' currently at {} baud", self.path, current);

        self.port
            .set_baud_rate(device.baud_rate)
            .map_err(|e| configure_error("set baud rate", e))?;
        self.port
            .set_data_bits(data_bits)
            .map_err(|e| configure_error("set data bits", e))?;
        self.port
            .set_stop_bits(stop_bits)
            .map_err(|e| configure_error("set stop bits", e))?;
        self.port
            .set_parity(parity)
            .map_err(|e| configure_error("set parity", e))?;
        self.port
            .set_flow_control(flow_control)
            .map_err(|e| configure_error("set flow control", e))?;
        self.port
            .set_timeout(timeouts.read_total(0))
            .map_err(|e| configure_error("set timeouts", e))?;

        info!(
            "Serial port '{}' configured: {} baud, {} data bits, {} stop bits, parity {:?}",
            self.path, device.baud_rate, device.data_bits, device.stop_bits, device.parity
        );

        Ok(SerialChannel {
            port: Some(self.port),
            path: self.path,
            timeouts,
        })
    }
}

#[async_trait]
impl DeviceLink for SerialChannel {
    async fn send_line(&mut self, request: &Request) -> SerialCalcResult<()> {
        let payload = request.as_str().as_bytes().to_vec();
        self.with_port(move |port, timeouts| write_line(port, &payload, timeouts))
            .await
    }

    async fn receive(&mut self, max_bytes: usize) -> SerialCalcResult<Vec<u8>> {
        self.with_port(move |port, timeouts| read_response(port, timeouts, max_bytes))
            .await
    }

    async fn close(&mut self) -> SerialCalcResult<()> {
        if self.port.take().is_some() {
            info!("Serial port '{}' closed", self.path);
        }
        Ok(())
    }
}

fn configure_error(step: &str, err: serialport::Error) -> SerialCalcError {
    SerialCalcError::Configure {
        message: format!("failed to {}: {}", step, err),
    }
}

fn send_error(err: io::Error) -> SerialCalcError {
    SerialCalcError::Send {
        message: err.to_string(),
    }
}

/// Writer whose per-write deadline can be adjusted
pub(crate) trait TimedWrite: Write {
    fn set_write_wait(&mut self, wait: Duration) -> io::Result<()>;
}

impl<'a> TimedWrite for dyn SerialPort + 'a {
    fn set_write_wait(&mut self, wait: Duration) -> io::Result<()> {
        self.set_timeout(wait).map_err(io::Error::from)
    }
}

/// Write the payload, then the terminator, as two separate writes.
///
/// A write the port does not fully accept is a send failure.
pub(crate) fn write_line<P: TimedWrite + ?Sized>(
    port: &mut P,
    payload: &[u8],
    timeouts: &TimeoutConfig,
) -> SerialCalcResult<()> {
    port.set_write_wait(timeouts.write_total(payload.len()))
        .map_err(send_error)?;
    port.write_all(payload).map_err(send_error)?;

    port.set_write_wait(timeouts.write_total(1)).map_err(send_error)?;
    port.write_all(b"\n").map_err(send_error)?;
    port.flush().map_err(send_error)?;

    debug!("Sent {} bytes plus terminator", payload.len());
    Ok(())
}

/// Reader whose per-call wait can be adjusted
pub(crate) trait TimedRead {
    fn set_wait(&mut self, wait: Duration) -> io::Result<()>;
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<'a> TimedRead for dyn SerialPort + 'a {
    fn set_wait(&mut self, wait: Duration) -> io::Result<()> {
        self.set_timeout(wait).map_err(io::Error::from)
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

/// Read up to `max_bytes` under an interval/total timeout pair.
///
/// The first byte may take the whole total budget. After that each read
/// waits at most the interval, and never past the total deadline.
pub(crate) fn read_response<P: TimedRead + ?Sized>(
    port: &mut P,
    timeouts: &TimeoutConfig,
    max_bytes: usize,
) -> SerialCalcResult<Vec<u8>> {
    let started = Instant::now();
    let budget = timeouts.read_total(max_bytes);
    let mut buffer = vec![0u8; max_bytes];
    let mut filled = 0;

    while filled < max_bytes {
        let remaining = budget.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        let wait = if filled == 0 {
            remaining
        } else {
            remaining.min(timeouts.interval())
        };

        port.set_wait(wait).map_err(|e| SerialCalcError::Receive {
            message: e.to_string(),
        })?;

        match port.read_some(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) => {
                warn!("Failed to read from serial port: {}", e);
                return Err(SerialCalcError::Receive {
                    message: e.to_string(),
                });
            }
        }
    }

    if filled == 0 {
        return Err(SerialCalcError::NoResponse);
    }

    buffer.truncate(filled);
    debug!("Received {} bytes over serial", filled);
    Ok(buffer)
}

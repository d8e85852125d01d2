use crate::core::session::request::Request;
use crate::domain::error::SerialCalcResult;
use async_trait::async_trait;

/// Request/response link to the calculator device.
///
/// One request is outstanding at a time: callers always pair a
/// `send_line` with a `receive` before sending again.
#[async_trait]
pub trait DeviceLink: Send {
    /// Transmit `request` followed by a single `\n` terminator.
    async fn send_line(&mut self, request: &Request) -> SerialCalcResult<()>;

    /// Wait for a response of at most `max_bytes` bytes.
    ///
    /// Returns the bytes exactly as read. An empty read is an error.
    async fn receive(&mut self, max_bytes: usize) -> SerialCalcResult<Vec<u8>>;

    /// Release the underlying resource. Further calls are no-ops.
    async fn close(&mut self) -> SerialCalcResult<()>;
}

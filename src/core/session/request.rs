use crate::domain::error::{SerialCalcError, SerialCalcResult};
use std::fmt;

/// Size of the line buffers shared with the device firmware.
pub const BUFFER_LIMIT: usize = 100;

/// Bytes of a line, newline terminator included, that fit in one buffer.
pub const MAX_LINE_LEN: usize = BUFFER_LIMIT - 1;

/// Longest request payload that can be transmitted.
pub const MAX_REQUEST_LEN: usize = MAX_LINE_LEN - 1;

/// Most bytes accepted from the device for one response.
pub const MAX_RESPONSE_LEN: usize = BUFFER_LIMIT - 1;

/// Literal input that ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// A validated, non-empty line ready to be transmitted to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request(String);

impl Request {
    pub fn new(text: impl Into<String>) -> SerialCalcResult<Self> {
        let text = text.into();
        if text.len() > MAX_REQUEST_LEN {
            return Err(SerialCalcError::InputTooLong { max: MAX_LINE_LEN });
        }
        if text.contains('\n') {
            return Err(SerialCalcError::Send {
                message: "request must not contain a line terminator".to_string(),
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

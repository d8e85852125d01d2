// Serial module - Serial device channel
pub mod channel;

pub use channel::{OpenPort, SerialChannel};

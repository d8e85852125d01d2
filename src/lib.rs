//! SerialCalc Library
//!
//! Host-side session layer for a calculator that runs on a serial-attached
//! device: connection setup, request framing, bounded response reception,
//! response classification, an inactivity watchdog and an append-only
//! activity log.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::domain::error::{SerialCalcError, SerialCalcResult};
pub use crate::domain::config::CalcConfig;
pub use crate::core::communication::{classify, ClassifiedResult, DeviceLink};
pub use crate::core::session::{Session, TerminationReason};
pub use crate::infrastructure::activity_log::{ActivityLog, LogEntry};
pub use crate::infrastructure::serial::SerialChannel;

// Session module - Interactive request/response session
pub mod console;
pub mod input;
pub mod request;
pub mod session;
pub mod state;
pub mod watchdog;

pub use console::SessionConsole;
pub use input::{InputReader, ReadOutcome};
pub use request::{Request, BUFFER_LIMIT, EXIT_COMMAND, MAX_LINE_LEN, MAX_RESPONSE_LEN};
pub use session::Session;
pub use state::{SessionState, TerminationReason};
pub use watchdog::InactivityWatchdog;

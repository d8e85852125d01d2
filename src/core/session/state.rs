use std::fmt;

/// Session loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminating(TerminationReason),
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// User entered the exit command
    UserExit,
    /// Idle threshold reached without a completed input
    Idle,
    /// Input stream was closed
    EndOfInput,
    /// Device could not be opened or configured
    ConnectFailure,
}

impl TerminationReason {
    /// Process exit status for this reason
    pub fn exit_code(self) -> i32 {
        match self {
            TerminationReason::ConnectFailure => 1,
            TerminationReason::UserExit
            | TerminationReason::Idle
            | TerminationReason::EndOfInput => 0,
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::UserExit => write!(f, "user exit"),
            TerminationReason::Idle => write!(f, "idle timeout"),
            TerminationReason::EndOfInput => write!(f, "end of input"),
            TerminationReason::ConnectFailure => write!(f, "connect failure"),
        }
    }
}

use crate::core::communication::{classify, DeviceLink};
use crate::core::session::console::SessionConsole;
use crate::core::session::input::{InputReader, ReadOutcome};
use crate::core::session::request::{Request, EXIT_COMMAND, MAX_LINE_LEN, MAX_RESPONSE_LEN};
use crate::core::session::state::{SessionState, TerminationReason};
use crate::core::session::watchdog::InactivityWatchdog;
use crate::infrastructure::activity_log::{ActivityLog, LogEntry};
use std::io::{self, Write};
use tokio::io::AsyncBufRead;
use tracing::{debug, info, warn};

/// One interactive session against a connected device.
///
/// Owns the link, the activity log and the watchdog for its whole lifetime;
/// `run` releases the link and the log on every way out of the loop.
pub struct Session<L, R, W: Write> {
    link: L,
    log: ActivityLog,
    watchdog: InactivityWatchdog,
    input: InputReader<R>,
    console: SessionConsole<W>,
}

impl<L, R, W> Session<L, R, W>
where
    L: DeviceLink,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        link: L,
        log: ActivityLog,
        watchdog: InactivityWatchdog,
        input: InputReader<R>,
        console: SessionConsole<W>,
    ) -> Self {
        Self {
            link,
            log,
            watchdog,
            input,
            console,
        }
    }

    /// Drive the loop until it terminates, then release resources.
    pub async fn run(mut self) -> TerminationReason {
        self.watchdog.reset();
        if !self.log.is_enabled() {
            debug!("Activity log disabled for this session");
        }
        info!("Session started");

        let reason = loop {
            if let SessionState::Terminating(reason) = self.step().await {
                break reason;
            }
        };

        self.show(|console| match reason {
            TerminationReason::UserExit => console.user_exit(),
            TerminationReason::Idle => console.idle_exit(),
            TerminationReason::EndOfInput => console.input_closed(),
            TerminationReason::ConnectFailure => Ok(()),
        });

        if let Err(e) = self.link.close().await {
            warn!("Failed to close device link: {}", e);
        }
        self.log.close();

        info!("Session terminated: {}", reason);
        reason
    }

    fn show<F>(&mut self, render: F)
    where
        F: FnOnce(&mut SessionConsole<W>) -> io::Result<()>,
    {
        if let Err(e) = render(&mut self.console) {
            warn!("Failed to write to console: {}", e);
        }
    }

    async fn step(&mut self) -> SessionState {
        if self.watchdog.is_expired() {
            return SessionState::Terminating(TerminationReason::Idle);
        }

        self.show(|console| console.prompt());

        let outcome =
            match tokio::time::timeout_at(self.watchdog.deadline(), self.input.read_line()).await {
                Err(_) => {
                    debug!("Idle threshold reached while waiting for input");
                    return SessionState::Terminating(TerminationReason::Idle);
                }
                Ok(Err(e)) => {
                    warn!("Failed to read user input: {}", e);
                    return SessionState::Terminating(TerminationReason::EndOfInput);
                }
                Ok(Ok(outcome)) => outcome,
            };

        let text = match outcome {
            ReadOutcome::Closed => {
                return SessionState::Terminating(TerminationReason::EndOfInput);
            }
            ReadOutcome::Overflow => {
                self.watchdog.reset();
                debug!("Discarded input longer than {} characters", MAX_LINE_LEN);
                self.show(|console| console.input_too_long(MAX_LINE_LEN));
                return SessionState::Running;
            }
            ReadOutcome::Line(text) => {
                self.watchdog.reset();
                text
            }
        };

        if text == EXIT_COMMAND {
            return SessionState::Terminating(TerminationReason::UserExit);
        }
        if text.is_empty() {
            return SessionState::Running;
        }

        match Request::new(text) {
            Ok(request) => self.exchange(request).await,
            Err(e) => {
                warn!("Rejected request: {}", e);
                self.show(|console| console.input_too_long(MAX_LINE_LEN));
            }
        }

        SessionState::Running
    }

    /// Send one request, show and log the classified response.
    async fn exchange(&mut self, request: Request) {
        if let Err(e) = self.link.send_line(&request).await {
            warn!("Send failed for '{}': {}", request, e);
            self.show(|console| console.send_failed());
            return;
        }

        let raw = match self.link.receive(MAX_RESPONSE_LEN).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Receive failed for '{}': {}", request, e);
                self.show(|console| console.receive_failed());
                return;
            }
        };

        let result = classify(&raw);
        if result.is_error() {
            info!("Device rejected '{}': {}", request, result);
        } else {
            debug!("'{}' classified as {}", request, result);
        }
        self.show(|console| console.result(&result));

        let entry = LogEntry::new(request.as_str(), String::from_utf8_lossy(&raw));
        if let Err(e) = self.log.append(&entry) {
            warn!("Failed to write activity log entry: {}", e);
        }
    }
}

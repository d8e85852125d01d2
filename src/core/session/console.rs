use crate::core::communication::ClassifiedResult;
use std::io::{self, Write};
use std::time::Duration;

/// Everything the interactive session shows the operator
pub struct SessionConsole<W: Write> {
    out: W,
    idle_timeout: Duration,
}

impl<W: Write> SessionConsole<W> {
    pub fn new(out: W, idle_timeout: Duration) -> Self {
        Self { out, idle_timeout }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, ">>> Serial Calculator <<<")?;
        writeln!(
            self.out,
            "Do calculations in the format: [number] [operator] [number] (e.g., 12 + 5)"
        )?;
        writeln!(
            self.out,
            "Calculator will terminate with command \"exit\", or after {} of inactivity",
            describe_duration(self.idle_timeout)
        )?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "Enter operation (or 'exit'): ")?;
        self.out.flush()
    }

    pub fn input_too_long(&mut self, max: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "ERROR: Input too long (max {} characters). Please try again.",
            max
        )
    }

    pub fn send_failed(&mut self) -> io::Result<()> {
        writeln!(self.out, "Error: Failed to send request to device.")
    }

    pub fn receive_failed(&mut self) -> io::Result<()> {
        writeln!(self.out, "Error: No response received from device.")
    }

    pub fn result(&mut self, result: &ClassifiedResult) -> io::Result<()> {
        match result {
            ClassifiedResult::Success(payload) => writeln!(self.out, "Result: {}", payload),
            ClassifiedResult::DivisionByZero => {
                writeln!(self.out, "Error: Division by zero is not allowed.")
            }
            ClassifiedResult::InvalidInput => {
                writeln!(self.out, "Error: Invalid input format.")?;
                self.banner()
            }
            ClassifiedResult::BufferFull => {
                writeln!(self.out, "Error: Input buffer full on device side.")
            }
            ClassifiedResult::UnknownError(payload) => {
                writeln!(self.out, "Unknown error received: {}", payload)
            }
        }
    }

    pub fn user_exit(&mut self) -> io::Result<()> {
        writeln!(self.out, "Exiting program.")
    }

    pub fn idle_exit(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "No activity for {}. Exiting.",
            describe_duration(self.idle_timeout)
        )
    }

    pub fn input_closed(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Input closed. Exiting.")
    }
}

/// "5 minutes", "1 minute", "90 seconds"
fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match (secs / 60, secs % 60) {
        (1, 0) => "1 minute".to_string(),
        (minutes, 0) if minutes > 0 => format!("{} minutes", minutes),
        _ if secs == 1 => "1 second".to_string(),
        _ => format!("{} seconds", secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut SessionConsole<&mut Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        let mut console = SessionConsole::new(&mut buffer, Duration::from_secs(300));
        f(&mut console).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(
            render(|c| c.result(&ClassifiedResult::Success("17".into()))),
            "Result: 17\n"
        );
        assert_eq!(
            render(|c| c.result(&ClassifiedResult::DivisionByZero)),
            "Error: Division by zero is not allowed.\n"
        );
        assert_eq!(
            render(|c| c.result(&ClassifiedResult::UnknownError("ERROR_X".into()))),
            "Unknown error received: ERROR_X\n"
        );
    }

    #[test]
    fn test_invalid_input_repeats_help() {
        let output = render(|c| c.result(&ClassifiedResult::InvalidInput));
        assert!(output.starts_with("Error: Invalid input format.\n"));
        assert!(output.contains("[number] [operator] [number]"));
    }

    #[test]
    fn test_banner_names_idle_timeout() {
        let output = render(|c| c.banner());
        assert!(output.contains("after 5 minutes of inactivity"));
    }

    #[test]
    fn test_prompt_has_no_newline() {
        assert_eq!(render(|c| c.prompt()), "Enter operation (or 'exit'): ");
    }

    #[test]
    fn test_describe_duration() {
        assert_eq!(describe_duration(Duration::from_secs(300)), "5 minutes");
        assert_eq!(describe_duration(Duration::from_secs(60)), "1 minute");
        assert_eq!(describe_duration(Duration::from_secs(90)), "90 seconds");
        assert_eq!(describe_duration(Duration::from_secs(1)), "1 second");
        assert_eq!(describe_duration(Duration::from_secs(0)), "0 seconds");
    }
}

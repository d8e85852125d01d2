use crate::core::session::request::MAX_LINE_LEN;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Result of reading one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line, terminator removed
    Line(String),
    /// The line did not fit; its bytes were consumed and discarded
    Overflow,
    /// Input stream reached end of file
    Closed,
}

/// Line reader that never buffers more than one line's worth of bytes.
///
/// A line fits when its content plus the `\n` terminator is at most
/// `max_line_len` bytes. A `\r` directly before the `\n` belongs to the
/// terminator. Anything longer is drained up to the next newline and
/// reported as [`ReadOutcome::Overflow`], and so is a final line that ends
/// without a newline.
pub struct InputReader<R> {
    inner: R,
    max_line_len: usize,
}

impl<R: AsyncBufRead + Unpin> InputReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, MAX_LINE_LEN)
    }

    pub fn with_limit(inner: R, max_line_len: usize) -> Self {
        Self {
            inner,
            max_line_len,
        }
    }

    pub fn max_content_len(&self) -> usize {
        self.max_line_len.saturating_sub(1)
    }

    pub async fn read_line(&mut self) -> io::Result<ReadOutcome> {
        let capacity = self.max_content_len();
        // One spare byte so a trailing '\r' can still be stripped at the limit.
        let mut line: Vec<u8> = Vec::with_capacity(capacity + 1);
        let mut dropped = false;
        let mut saw_bytes = false;
        let mut terminated = false;

        while !terminated {
            let used = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    break;
                }
                saw_bytes = true;

                let (chunk, used) = match available.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        terminated = true;
                        (&available[..i], i + 1)
                    }
                    None => (available, available.len()),
                };

                let room = (capacity + 1).saturating_sub(line.len());
                if chunk.len() > room {
                    dropped = true;
                }
                line.extend_from_slice(&chunk[..chunk.len().min(room)]);
                used
            };
            self.inner.consume(used);
        }

        if !saw_bytes {
            return Ok(ReadOutcome::Closed);
        }
        if terminated && line.last() == Some(&b'\r') {
            line.pop();
        }
        // No terminator means the line was never completed.
        if dropped || !terminated || line.len() > capacity {
            return Ok(ReadOutcome::Overflow);
        }

        Ok(ReadOutcome::Line(String::from_utf8_lossy(&line).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_reads_lines_in_order() {
        let mut reader = InputReader::new(&b"12 + 5\nexit\n"[..]);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("12 + 5".into()));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("exit".into()));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Closed);
    }

    #[tokio::test]
    async fn test_line_split_across_reads() {
        let mock = Builder::new().read(b"12 ").read(b"+ 5").read(b"\n").build();
        let mut reader = InputReader::new(BufReader::new(mock));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("12 + 5".into()));
    }

    #[tokio::test]
    async fn test_empty_line_is_not_closed() {
        let mut reader = InputReader::new(&b"\n"[..]);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line(String::new()));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Closed);
    }

    #[tokio::test]
    async fn test_boundary_lengths() {
        let fits = format!("{}\n", "1".repeat(98));
        let mut reader = InputReader::new(fits.as_bytes());
        assert_eq!(
            reader.read_line().await.unwrap(),
            ReadOutcome::Line("1".repeat(98))
        );

        let too_long = format!("{}\n", "1".repeat(99));
        let mut reader = InputReader::new(too_long.as_bytes());
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Overflow);
    }

    #[tokio::test]
    async fn test_overflow_discards_rest_of_line() {
        let input = format!("{}\n1 + 1\n", "9".repeat(500));
        let mut reader = InputReader::new(input.as_bytes());
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Overflow);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("1 + 1".into()));
    }

    #[tokio::test]
    async fn test_overflow_across_chunks() {
        let mock = Builder::new()
            .read(&[b'7'; 60])
            .read(&[b'7'; 60])
            .read(b"\n2 * 3\n")
            .build();
        let mut reader = InputReader::new(BufReader::new(mock));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Overflow);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("2 * 3".into()));
    }

    #[tokio::test]
    async fn test_crlf_terminator() {
        let input = format!("{}\r\n", "1".repeat(98));
        let mut reader = InputReader::new(input.as_bytes());
        assert_eq!(
            reader.read_line().await.unwrap(),
            ReadOutcome::Line("1".repeat(98))
        );
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_overflow() {
        let mut reader = InputReader::new(&b"1 + 1\n3 - 1"[..]);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Line("1 + 1".into()));
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Overflow);
        assert_eq!(reader.read_line().await.unwrap(), ReadOutcome::Closed);
    }
}

//! CRLF line extraction from a buffered byte stream.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::{Instant, timeout_at};

/// Failure while reading a single line.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The inactivity deadline fired before a full line arrived.
    #[error("read deadline elapsed")]
    TimedOut,
    /// The peer closed the stream in the middle of a line.
    #[error("connection ended mid-line")]
    Truncated,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads `\r\n`-terminated lines and tracks whether the current request has
/// produced any bytes yet.
pub struct LineReader<R> {
    inner: BufReader<R>,
    pending: Vec<u8>,
    deadline: Option<Instant>,
    received: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            inner: BufReader::new(stream),
            pending: Vec::with_capacity(256),
            deadline: None,
            received: false,
        }
    }

    /// Starts a new request cycle: arms the deadline and forgets whether
    /// bytes were seen during the previous one.
    pub fn arm(&mut self, timeout: Duration) {
        self.deadline = Some(Instant::now() + timeout);
        self.received = false;
    }

    /// Whether any byte of the current request has been read, including a
    /// partial line left behind by a timeout.
    pub fn received(&self) -> bool {
        self.received || !self.pending.is_empty()
    }

    /// Returns the next line without its terminator.
    ///
    /// `Ok(None)` means the stream ended cleanly on a line boundary. An end of
    /// stream after partial data is [`LineError::Truncated`].
    pub async fn read_line(&mut self) -> Result<Option<String>, LineError> {
        loop {
            let read = self.inner.read_until(b'\n', &mut self.pending);
            let n = match self.deadline {
                Some(deadline) => timeout_at(deadline, read)
                    .await
                    .map_err(|_| LineError::TimedOut)??,
                None => read.await?,
            };

            if n == 0 {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Err(LineError::Truncated);
            }
            self.received = true;

            // A bare LF is line content; keep going until CRLF.
            if self.pending.ends_with(b"\r\n") {
                let len = self.pending.len() - 2;
                let bytes: Vec<u8> = self.pending.drain(..).take(len).collect();
                return String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| LineError::InvalidUtf8);
            }
        }
    }

    /// The underlying stream, for writing responses.
    pub fn get_mut(&mut self) -> &mut R {
        self.inner.get_mut()
    }
}

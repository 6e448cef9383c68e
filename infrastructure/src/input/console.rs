//! Line-based operator input.

use async_trait::async_trait;
use eventcrew_application::{InputError, UserInputPort};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Asks on a writer and reads one line per answer from a reader.
///
/// Questions are serialised: a second caller waits until the first answer
/// has been read.
pub struct ConsoleInput<R, W> {
    io: Mutex<(Lines<R>, W)>,
    timeout: Option<Duration>,
    cancel: CancellationToken,
}

/// Console input on the process's stdin/stdout.
pub type StdinInput = ConsoleInput<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

impl StdinInput {
    pub fn stdio() -> Self {
        ConsoleInput::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleInput<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new((reader.lines(), writer)),
            timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pending questions fail with [`InputError::Cancelled`] once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

async fn sleep_or_pending(timeout: Option<Duration>) {
    match timeout {
        Some(d) => tokio::time::sleep(d).await,
        None => std::future::pending().await,
    }
}

#[async_trait]
impl<R, W> UserInputPort for ConsoleInput<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&self, question: &str) -> Result<String, InputError> {
        let mut guard = self.io.lock().await;
        let (lines, writer) = &mut *guard;

        let prompt = format!("\n{}\n> ", question);
        writer
            .write_all(prompt.as_bytes())
            .await
            .map_err(|e| InputError::Io(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| InputError::Io(e.to_string()))?;

        let answer = tokio::select! {
            line = lines.next_line() => line.map_err(|e| InputError::Io(e.to_string()))?,
            _ = self.cancel.cancelled() => return Err(InputError::Cancelled),
            _ = sleep_or_pending(self.timeout) => {
                debug!("No operator answer within {:?}", self.timeout);
                return Err(InputError::TimedOut);
            }
        };

        match answer {
            Some(line) => Ok(line.trim_end_matches('\r').to_string()),
            None => Err(InputError::Closed),
        }
    }
}

/// For transports that own stdin (the stdio tool server).
pub struct NoOperatorInput;

#[async_trait]
impl UserInputPort for NoOperatorInput {
    async fn ask(&self, _question: &str) -> Result<String, InputError> {
        Err(InputError::Io("no operator console attached".to_string()))
    }
}

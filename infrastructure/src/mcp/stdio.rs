//! Newline-delimited JSON-RPC over a reader/writer pair (stdin/stdout).

use super::error::McpError;
use super::server::McpServer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::info;

impl McpServer {
    /// Serve on the process's stdin/stdout until EOF or cancellation.
    pub async fn serve_stdio(&self, cancel: CancellationToken) -> Result<(), McpError> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve_lines(stdin, tokio::io::stdout(), cancel).await
    }

    /// One message per line in, one response per line out.
    ///
    /// A line that is not UTF-8 or not JSON is answered with `PARSE_ERROR`;
    /// only EOF, a read error or cancellation end the loop.
    pub async fn serve_lines<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        cancel: CancellationToken,
    ) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Tool server listening on stdio");
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = tokio::select! {
                read = reader.read_until(b'\n', &mut line) => read?,
                _ = cancel.cancelled() => break,
            };
            if read == 0 {
                break;
            }
            if line.trim_ascii().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_bytes(line.trim_ascii_end()).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Tool server stopped");
        Ok(())
    }
}

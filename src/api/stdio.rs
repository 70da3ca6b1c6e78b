//! Newline-delimited JSON-RPC over stdin/stdout.
//!
//! One message per line. Responses are written in request order; stdout
//! carries nothing else.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::api::handlers::handle_message;
use crate::state::AppState;

/// Serves the process's stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub async fn serve_stdio(state: AppState) -> std::io::Result<()> {
    info!("Serving MCP over stdio");
    serve_lines(&state, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Reads messages line by line from `reader` and writes responses to `writer`.
///
/// Blank lines are skipped. Returns when the reader reaches end of input.
///
/// # Errors
///
/// Returns I/O errors from either side.
pub async fn serve_lines<I, O>(state: &AppState, input: I, mut output: O) -> std::io::Result<()>
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = handle_message(state, line).await else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        output.write_all(&payload).await?;
        output.flush().await?;
    }

    debug!("Input closed");
    Ok(())
}

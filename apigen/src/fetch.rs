//! Remote template archive download

use std::fs::File;
use std::io::Write;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::GenerateError;

/// Download `url` into `dest`, racing every await against `cancel`.
///
/// The response status is checked before any byte is written; a non-success
/// status fails without touching `dest`. A single GET is issued, never
/// retried. The caller owns `dest` (normally a temp file) and is responsible
/// for discarding it on failure.
///
/// # Errors
///
/// Returns [`GenerateError::RemoteFetchFailed`] on a non-success status,
/// [`GenerateError::Cancelled`] if `cancel` fires mid-transfer,
/// [`GenerateError::Network`] on transport errors and [`GenerateError::Io`]
/// if writing the buffer fails.
pub async fn fetch_archive(
    url: &str,
    dest: &mut File,
    cancel: &CancellationToken,
) -> Result<(), GenerateError> {
    let response = tokio::select! {
        r = reqwest::get(url) => r?,
        () = cancel.cancelled() => return Err(GenerateError::Cancelled),
    };

    let status = response.status();
    if !status.is_success() {
        return Err(GenerateError::RemoteFetchFailed {
            status: status.as_u16(),
        });
    }

    let mut stream = response.bytes_stream();
    let mut written: usize = 0;
    loop {
        let chunk = tokio::select! {
            c = stream.next() => c,
            () = cancel.cancelled() => return Err(GenerateError::Cancelled),
        };
        let Some(chunk) = chunk else { break };
        let chunk = chunk?;
        dest.write_all(&chunk)?;
        written += chunk.len();
    }
    dest.flush()?;

    debug!(url = %url, bytes = written, "template archive downloaded");
    Ok(())
}

// relay module: forwarding a finished report to a chat channel

mod slack;

use std::future::Future;
use std::io::Write;

use crate::error::ReportError;

pub use slack::SlackRelay;

/// Destination that receives the rendered report after local output.
pub trait Relay {
    fn send(&self, text: &str) -> impl Future<Output = Result<(), ReportError>> + Send;
}

/// Write `text` to `sink`, then hand it to `relay` if one is given.
///
/// The local copy is written and flushed before the relay is attempted, so a
/// relay failure never loses the report.
pub async fn deliver<W: Write, R: Relay>(
    text: &str,
    sink: &mut W,
    relay: Option<&R>,
) -> Result<(), ReportError> {
    sink.write_all(text.as_bytes())?;
    sink.flush()?;

    if let Some(relay) = relay {
        if let Err(e) = relay.send(text).await {
            tracing::warn!("relay: {e}");
            return Err(e);
        }
        tracing::debug!("relay: delivered {} bytes", text.len());
    }
    Ok(())
}

//! Long-polling ingress for local development: clears any webhook, then drains teloxide's [`Polling`]
//! listener into the update queue in order.

use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use teloxide::requests::Requester;
use teloxide::types::Update;
use teloxide::update_listeners::{AsUpdateStream, Polling, UpdateListener};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use unishark_core::{BotError, Result};

/// Server-side long-poll timeout; below teloxide's default HTTP client timeout.
const POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls until `shutdown` resolves or the update queue closes. Fails only when the webhook cannot be cleared.
///
/// Offsets and retry backoff are handled by the listener. On shutdown the listener is stopped and drained,
/// which confirms the last received offset with Telegram.
#[instrument(skip_all)]
pub async fn run_polling<S>(
    bot: teloxide::Bot,
    updates: mpsc::Sender<Update>,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = ()>,
{
    bot.delete_webhook()
        .await
        .map_err(|e| BotError::Transport(format!("deleteWebhook failed: {}", e)))?;
    info!("Webhook cleared, starting long polling");

    let mut listener = Polling::builder(bot).timeout(POLL_TIMEOUT).build();
    // Taken before as_stream so the token stays bound to the stream.
    let stop_token = listener.stop_token();
    let stream = listener.as_stream();
    tokio::pin!(stream);
    tokio::pin!(shutdown);
    let mut stopping = false;

    loop {
        tokio::select! {
            _ = &mut shutdown, if !stopping => {
                debug!("Shutdown requested, stopping listener");
                stop_token.stop();
                stopping = true;
            }
            next = stream.next() => match next {
                Some(Ok(update)) => {
                    let update_id = update.id.0;
                    if updates.send(update).await.is_err() {
                        warn!("Update queue closed, stopping polling");
                        return Ok(());
                    }
                    debug!(update_id, "Polled update enqueued");
                }
                Some(Err(e)) => warn!(error = %e, "getUpdates failed, retrying"),
                None => break,
            },
        }
    }

    info!("Polling stopped");
    Ok(())
}

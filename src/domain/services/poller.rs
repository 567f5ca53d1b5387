#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;

use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::ChatGateway;
use crate::domain::models::ChatGatewayArc;
use crate::domain::models::Event;

/// Repeatedly fetches the message list while a member is signed in. Started
/// without a token it stays idle. Each fetch runs in its own task and is
/// numbered; overlapping fetches are never cancelled, consumers drop the
/// stale ones by sequence instead.
pub struct Poller {}

pub struct PollerHandle {
    cancel: CancellationToken,
    refresh: mpsc::UnboundedSender<()>,
}

impl Poller {
    pub fn start(
        gateway: ChatGatewayArc,
        token: Option<String>,
        interval_ms: u64,
        tx: mpsc::UnboundedSender<Event>,
    ) -> PollerHandle {
        let cancel = CancellationToken::new();
        let (refresh_tx, mut refresh_rx) = mpsc::unbounded_channel::<()>();

        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => {
                // Signed out: no fetch is ever issued, but the handle still
                // behaves like any other on shutdown paths.
                return PollerHandle {
                    cancel,
                    refresh: refresh_tx,
                };
            }
        };

        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            // tokio panics on a zero period.
            let mut ticker = time::interval(time::Duration::from_millis(interval_ms.max(1)));
            let mut seq: u64 = 0;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        break;
                    }
                    _ = ticker.tick() => {}
                    refreshed = refresh_rx.recv() => {
                        if refreshed.is_none() {
                            break;
                        }
                    }
                }

                seq += 1;
                let fetch_gateway = gateway.clone();
                let fetch_token = token.clone();
                let fetch_tx = tx.clone();
                let fetch_seq = seq;

                tokio::spawn(async move {
                    match fetch_gateway.fetch_messages(&fetch_token).await {
                        Ok(messages) => {
                            let _ = fetch_tx.send(Event::MessagesLoaded(fetch_seq, messages));
                        }
                        Err(err) => {
                            tracing::warn!(error = ?err, seq = fetch_seq, "poll fetch failed");
                            let _ = fetch_tx.send(Event::ChatError(err.to_string()));
                        }
                    }
                });
            }
        });

        return PollerHandle {
            cancel,
            refresh: refresh_tx,
        };
    }
}

impl PollerHandle {
    /// Sender that triggers one extra fetch outside the timer cadence.
    pub fn refresher(&self) -> mpsc::UnboundedSender<()> {
        return self.refresh.clone();
    }

    /// Idempotent; safe to call from every exit path.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

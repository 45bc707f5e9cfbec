//! One-way progress channel from the compositor worker to the foreground.
//!
//! The channel is unbounded: the worker never waits on the consumer, and a
//! consumer that went away simply stops receiving.

use tokio::sync::mpsc;

use crate::types::ProgressEvent;

/// Receiving half, owned by the presentation layer.
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Sending half, owned by the compositor worker.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

/// Create a connected sender/receiver pair.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx: Some(tx) }, rx)
}

impl ProgressSender {
    /// A sender that drops every event.
    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    /// Deliver an event. Never blocks; a closed receiver is not an error.
    pub fn send(&self, event: ProgressEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            tracing::trace!("Progress receiver closed, dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (tx, mut rx) = progress_channel();

        tx.send(ProgressEvent::Started { total: 2 });
        tx.send(ProgressEvent::Completed { written: 2 });
        drop(tx);

        assert_eq!(rx.recv().await, Some(ProgressEvent::Started { total: 2 }));
        assert_eq!(
            rx.recv().await,
            Some(ProgressEvent::Completed { written: 2 })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_send_from_blocking_thread() {
        let (tx, mut rx) = progress_channel();

        tokio::task::spawn_blocking(move || {
            for written in 0..3 {
                tx.send(ProgressEvent::Completed { written });
            }
        })
        .await
        .unwrap();

        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_closed_receiver_is_ignored() {
        let (tx, rx) = progress_channel();
        drop(rx);
        tx.send(ProgressEvent::Started { total: 1 });
        ProgressSender::disconnected().send(ProgressEvent::Started { total: 1 });
    }
}

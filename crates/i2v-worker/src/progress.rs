//! Progress reporting for a generation run.
//!
//! The poller owns a [`ProgressTracker`], the only writer of the progress
//! state. Every change is forwarded as a [`ProgressEvent`] over a channel so
//! the presentation layer can render it without being coupled to the loop.

use tokio::sync::mpsc;

use i2v_models::{ProgressEvent, ProgressState};

/// Progress sender handed to the poller.
#[derive(Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSender {
    /// Send a progress event. Events are dropped if nobody listens.
    pub fn send(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }
}

/// Progress receiver for collecting events.
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl ProgressReceiver {
    /// Receive the next progress event.
    pub async fn recv(&mut self) -> Option<ProgressEvent> {
        self.rx.recv().await
    }

    /// Try to receive a progress event without blocking.
    pub fn try_recv(&mut self) -> Option<ProgressEvent> {
        self.rx.try_recv().ok()
    }
}

/// Create a progress channel pair.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, ProgressReceiver { rx })
}

/// A no-op progress sender for when progress reporting is not needed.
pub fn noop_sender() -> ProgressSender {
    let (tx, _rx) = mpsc::unbounded_channel();
    ProgressSender { tx }
}

/// Single writer of the progress state for one invocation.
///
/// Progress only grows (one unit per tick, clamped below 100) and is shared
/// by every job of the batch.
pub struct ProgressTracker {
    state: ProgressState,
    ticks: u32,
    sender: ProgressSender,
}

impl ProgressTracker {
    pub fn new(sender: ProgressSender) -> Self {
        Self {
            state: ProgressState::default(),
            ticks: 0,
            sender,
        }
    }

    /// Record one polling tick.
    pub fn tick(&mut self) {
        if !self.state.active {
            return;
        }
        self.ticks += 1;
        self.state.advance();
        self.sender.send(self.state.to_event());
    }

    /// Hide the indicator. Only the first call emits an event.
    pub fn clear(&mut self) {
        if !self.state.active {
            return;
        }
        self.state.clear();
        self.sender.send(ProgressEvent::Cleared);
    }

    /// Ticks recorded so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use i2v_models::{PROGRESS_CEILING, SLOW_PROGRESS_TEXT};

    #[tokio::test]
    async fn test_tick_emits_updates() {
        let (sender, mut receiver) = channel();
        let mut tracker = ProgressTracker::new(sender);

        tracker.tick();
        tracker.tick();

        assert_eq!(receiver.recv().await.unwrap().percent(), Some(1));
        assert_eq!(receiver.recv().await.unwrap().percent(), Some(2));
        assert_eq!(tracker.ticks(), 2);
    }

    #[tokio::test]
    async fn test_clear_emits_once() {
        let (sender, mut receiver) = channel();
        let mut tracker = ProgressTracker::new(sender);

        tracker.tick();
        tracker.clear();
        tracker.clear();
        tracker.tick();
        drop(tracker);

        let mut events = Vec::new();
        while let Some(event) = receiver.recv().await {
            events.push(event);
        }

        assert_eq!(events.len(), 2);
        assert!(events[1].is_cleared());
    }

    #[test]
    fn test_ceiling_switches_message() {
        let (sender, mut receiver) = channel();
        let mut tracker = ProgressTracker::new(sender);

        for _ in 0..120 {
            tracker.tick();
        }

        let mut last = None;
        while let Some(event) = receiver.try_recv() {
            last = Some(event);
        }
        assert_eq!(
            last,
            Some(ProgressEvent::update(PROGRESS_CEILING, SLOW_PROGRESS_TEXT))
        );
    }

    #[test]
    fn test_noop_sender() {
        let mut tracker = ProgressTracker::new(noop_sender());
        // Should not panic even though receiver is dropped
        tracker.tick();
        tracker.clear();
        assert_eq!(tracker.ticks(), 1);
    }
}

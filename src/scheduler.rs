use std::time::Duration;

use tokio::task::JoinSet;
use tracing::debug;

use crate::events::{AppEvent, Deferred, EventSender};

/// Posts deferred tasks onto the UI event channel.
///
/// Delayed tasks run as timers owned by the scheduler, so dropping it (when
/// the screen goes away) aborts anything still pending.
pub struct Scheduler {
    sender: EventSender,
    timers: JoinSet<()>,
}

impl Scheduler {
    pub fn new(sender: EventSender) -> Self {
        Self {
            sender,
            timers: JoinSet::new(),
        }
    }

    pub fn defer(&mut self, delay: Duration, task: Deferred) {
        self.reap_finished();

        if delay.is_zero() {
            if self.sender.send(AppEvent::Deferred(task)).is_err() {
                debug!("Event loop is gone, dropping deferred task");
            }
            return;
        }

        let sender = self.sender.clone();
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(AppEvent::Deferred(task)).is_err() {
                debug!("Event loop is gone, dropping deferred task");
            }
        });
    }

    /// Abort every pending timer.
    pub fn cancel_all(&mut self) {
        self.timers.abort_all();
    }

    fn reap_finished(&mut self) {
        while self.timers.try_join_next().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;

    #[test]
    fn test_zero_delay_is_posted_immediately() {
        let (tx, mut rx) = events::channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer(Duration::ZERO, Deferred::EnableInput);

        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::Deferred(Deferred::EnableInput))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_task_fires_after_delay() {
        let (tx, mut rx) = events::channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer(Duration::from_secs(1), Deferred::AdvanceOrFinish);
        assert!(rx.try_recv().is_err());

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            AppEvent::Deferred(Deferred::AdvanceOrFinish)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_drops_pending_timers() {
        let (tx, mut rx) = events::channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer(Duration::from_secs(1), Deferred::EnableInput);
        scheduler.cancel_all();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_task_after_receiver_dropped() {
        let (tx, rx) = events::channel();
        let mut scheduler = Scheduler::new(tx);

        scheduler.defer(Duration::from_secs(1), Deferred::EnableInput);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(2)).await;
        let finished = scheduler.timers.join_next().await.unwrap();
        assert!(finished.is_ok());
    }
}

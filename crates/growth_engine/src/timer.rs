use std::sync::{mpsc, Arc};
use std::time::Duration;

use growth_logging::growth_trace;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Fixed-period timer emitting [`EngineEvent::PollTick`].
///
/// The first tick fires one period after start. Ticks that would pile up
/// behind a stalled sink are delayed, not bunched. Once cancelled (explicitly or
/// by dropping the timer) no further tick is emitted.
pub struct PollTimer {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollTimer {
    /// Starts the timer on the current tokio runtime.
    pub fn start(period: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self::start_on(&Handle::current(), period, sink)
    }

    pub fn start_on(handle: &Handle, period: Duration, sink: Arc<dyn EventSink>) -> Self {
        let period = period.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick = 0u64;
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        tick += 1;
                        growth_trace!("poll tick {}", tick);
                        sink.emit(EngineEvent::PollTick { tick });
                    }
                }
            }
        });

        Self {
            token,
            task: Some(task),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancels the timer and waits for its task to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

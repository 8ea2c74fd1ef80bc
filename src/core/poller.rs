use crate::domain::ports::SensorSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Runs a [`SensorSource`] once immediately and then on every tick.
pub struct Poller {
    source: Arc<dyn SensorSource>,
    interval: Duration,
}

impl Poller {
    pub fn new(source: Arc<dyn SensorSource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Spawns the periodic task on the current tokio runtime.
    pub fn start(self) -> PollerHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(run(self.source, self.interval, token.clone()));
        PollerHandle { token, task }
    }
}

async fn run(source: Arc<dyn SensorSource>, period: Duration, token: CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: JoinSet<()> = JoinSet::new();

    tracing::info!(
        "🔄 Polling {} source every {:?}",
        source.name(),
        period
    );

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                // 清掉已完成的刷新
                while in_flight.try_join_next().is_some() {}

                // 不等待上一次的刷新, 慢的請求可以重疊
                tracing::debug!("Poll tick ({} refreshes still in flight)", in_flight.len());
                let source = Arc::clone(&source);
                in_flight.spawn(async move { source.refresh().await });
            }
        }
    }

    if !in_flight.is_empty() {
        tracing::debug!("Aborting {} in-flight refreshes", in_flight.len());
    }
    in_flight.shutdown().await;
    tracing::info!("⏹️ Poller stopped");
}

pub struct PollerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.task.is_finished()
    }

    /// Stops the timer and waits until no refresh can touch the board again.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::error!("Poller task ended abnormally: {}", e);
        }
    }
}

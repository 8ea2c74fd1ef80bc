use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thruster_dashboard::core::poller::Poller;
use thruster_dashboard::core::SensorSource;

#[derive(Default)]
struct CountingSource {
    started: AtomicUsize,
    finished: AtomicUsize,
    work: Duration,
}

impl CountingSource {
    fn slow(work: Duration) -> Self {
        Self {
            work,
            ..Default::default()
        }
    }

    fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SensorSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn refresh(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
        if !self.work.is_zero() {
            tokio::time::sleep(self.work).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(start_paused = true)]
async fn test_polls_immediately_then_every_interval() {
    let source = Arc::new(CountingSource::default());
    let handle = Poller::new(source.clone(), Duration::from_millis(2000)).start();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(source.started(), 1);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(source.started(), 2);

    tokio::time::sleep(Duration::from_millis(6000)).await;
    assert_eq!(source.started(), 5);

    assert!(handle.is_running());
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_polling() {
    let source = Arc::new(CountingSource::default());
    let handle = Poller::new(source.clone(), Duration::from_millis(2000)).start();

    tokio::time::sleep(Duration::from_millis(10)).await;
    handle.stop().await;
    let polled = source.started();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.started(), polled);
}

#[tokio::test(start_paused = true)]
async fn test_slow_refreshes_overlap() {
    // 每次刷新 5 秒, 間隔 2 秒: 新的 tick 不等上一次完成
    let source = Arc::new(CountingSource::slow(Duration::from_secs(5)));
    let handle = Poller::new(source.clone(), Duration::from_millis(2000)).start();

    tokio::time::sleep(Duration::from_millis(4010)).await;
    assert_eq!(source.started(), 3);
    assert_eq!(source.finished(), 0);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(source.finished(), 1);

    // 停止時中止仍在進行的刷新
    handle.stop().await;
    let finished = source.finished();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.finished(), finished);
}

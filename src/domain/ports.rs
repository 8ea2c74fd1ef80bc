use crate::domain::model::{ElementLayout, SourceMode};
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn mode(&self) -> SourceMode;
    fn poll_interval(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
    fn slider_min(&self) -> i64;
    fn slider_max(&self) -> i64;
    fn initial_pwm(&self) -> i64;
    fn layout(&self) -> ElementLayout;
    fn simulator_seed(&self) -> Option<u64>;
}

/// Where the poller gets its readings from.
///
/// A refresh never fails from the caller's point of view: each reading is
/// written to the board on success and logged on failure.
#[async_trait]
pub trait SensorSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn refresh(&self);
}

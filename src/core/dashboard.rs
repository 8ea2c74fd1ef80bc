use crate::adapters::{DeviceClient, DisplayBoard, SliderControl};
use crate::config::toml_config::MIN_INTERVAL_MS;
use crate::core::command_sender::CommandSender;
use crate::core::controls::SliderController;
use crate::core::device_source::DeviceSource;
use crate::core::poller::{Poller, PollerHandle};
use crate::core::reflector::Reflector;
use crate::core::simulator::SimulatedSource;
use crate::domain::model::{ElementLayout, SliderEvent, SourceMode};
use crate::domain::ports::{ConfigProvider, SensorSource};
use crate::utils::error::Result;
use crate::utils::validation::validate_min_value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 關閉時等待未完成 PWM 指令的時間
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// A running dashboard: element handles captured once, poller started,
/// slider wired.
pub struct Dashboard {
    board: DisplayBoard,
    layout: ElementLayout,
    mode: SourceMode,
    controller: SliderController,
    poller: PollerHandle,
    pending: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Must be called inside a tokio runtime.
    pub fn setup<C: ConfigProvider>(config: &C) -> Result<Self> {
        let interval = config.poll_interval();
        validate_min_value(
            "poll_interval_ms",
            u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            MIN_INTERVAL_MS,
        )?;

        let mode = config.mode();
        let layout = config.layout();
        let board = DisplayBoard::new();
        let slider = SliderControl::new(
            config.slider_min(),
            config.slider_max(),
            config.initial_pwm(),
        );

        let (source, sender): (Arc<dyn SensorSource>, Option<CommandSender>) = match mode {
            SourceMode::Device => {
                let client = DeviceClient::new(config.base_url(), config.request_timeout())?;
                tracing::info!("🔌 Talking to device at {}", client.base_url());
                let source: Arc<dyn SensorSource> =
                    Arc::new(DeviceSource::new(client.clone(), board.clone(), &layout));
                (source, Some(CommandSender::new(client)))
            }
            SourceMode::Simulated => {
                tracing::info!("🎲 No device: using simulated sensor data");
                let source: Arc<dyn SensorSource> = Arc::new(SimulatedSource::new(
                    board.clone(),
                    slider.clone(),
                    layout.clone(),
                    config.simulator_seed(),
                ));
                (source, None)
            }
        };

        let controller =
            SliderController::new(slider, Reflector::new(board.clone(), &layout), sender);
        controller.reflect_current();
        let (min, max) = controller.slider().bounds();
        tracing::info!(
            "🎚️ Slider #{} range {}..={}, starting at {}",
            layout.slider,
            min,
            max,
            controller.slider().value()
        );

        let poller = Poller::new(source, interval).start();

        Ok(Self {
            board,
            layout,
            mode,
            controller,
            poller,
            pending: Vec::new(),
        })
    }

    pub fn board(&self) -> &DisplayBoard {
        &self.board
    }

    pub fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn slider_value(&self) -> i64 {
        self.controller.slider().value()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn handle_slider(&mut self, event: SliderEvent) {
        self.pending.retain(|task| !task.is_finished());
        if let Some(task) = self.controller.handle(event) {
            self.pending.push(task);
        }
    }

    /// Stops polling and waits up to [`SHUTDOWN_GRACE`] for PWM commands
    /// that are still being sent.
    pub async fn shutdown(self) {
        self.shutdown_with_grace(SHUTDOWN_GRACE).await;
    }

    /// Commands still unfinished after `grace` are aborted.
    pub async fn shutdown_with_grace(self, grace: Duration) {
        self.poller.stop().await;

        let deadline = tokio::time::Instant::now() + grace;
        for mut task in self.pending {
            match tokio::time::timeout_at(deadline, &mut task).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("PWM command task failed: {}", e),
                Err(_) => {
                    tracing::warn!("⚠️ PWM command still in flight after {:?}, aborting", grace);
                    task.abort();
                }
            }
        }
        tracing::info!("👋 Dashboard shut down");
    }
}

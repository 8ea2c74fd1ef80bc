use crate::adapters::{DeviceClient, DisplayBoard};
use crate::domain::model::{format_temperature, format_wind, ElementLayout};
use crate::domain::ports::SensorSource;
use crate::utils::error::DashboardError;
use async_trait::async_trait;

/// Reads temperature and wind speed from the device.
pub struct DeviceSource {
    client: DeviceClient,
    board: DisplayBoard,
    temperature_id: String,
    air_speed_id: String,
}

impl DeviceSource {
    pub fn new(client: DeviceClient, board: DisplayBoard, layout: &ElementLayout) -> Self {
        Self {
            client,
            board,
            temperature_id: layout.temperature.clone(),
            air_speed_id: layout.air_speed.clone(),
        }
    }

    pub async fn update_temperature(&self) {
        match self.client.fetch_temperature().await {
            Ok(celsius) => self
                .board
                .set_text(&self.temperature_id, format_temperature(celsius)),
            Err(e) => log_failure("temperature", &e),
        }
    }

    pub async fn update_wind(&self) {
        match self.client.fetch_wind().await {
            Ok(kmh) => self.board.set_text(&self.air_speed_id, format_wind(kmh)),
            Err(e) => log_failure("air speed", &e),
        }
    }
}

fn log_failure(reading: &str, error: &DashboardError) {
    if error.is_malformed_response() {
        tracing::warn!("⚠️ Ignoring {} response: {}", reading, error);
    } else if error.is_request_failure() {
        tracing::error!("❌ Could not retrieve {} data: {}", reading, error);
    } else {
        tracing::error!("❌ Cannot request {} data: {}", reading, error);
    }
}

#[async_trait]
impl SensorSource for DeviceSource {
    fn name(&self) -> &'static str {
        "device"
    }

    async fn refresh(&self) {
        // 兩個請求各自處理結果, 一個失敗不影響另一個
        tokio::join!(self.update_temperature(), self.update_wind());
    }
}

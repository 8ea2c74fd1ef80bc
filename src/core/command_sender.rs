use crate::adapters::DeviceClient;
use crate::domain::model::PwmCommand;
use crate::utils::error::Result;
use tokio::task::JoinHandle;

/// Forwards committed PWM values to the device, one POST per commit.
#[derive(Debug, Clone)]
pub struct CommandSender {
    client: DeviceClient,
}

impl CommandSender {
    pub fn new(client: DeviceClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, pwm_val: i64) -> Result<()> {
        tracing::info!("📤 Sending PWM value to device: {}", pwm_val);
        self.client.send_pwm(PwmCommand::new(pwm_val)).await
    }

    /// Fire-and-forget: the outcome is only logged. The handle lets
    /// teardown wait for the request.
    pub fn dispatch(&self, pwm_val: i64) -> JoinHandle<()> {
        let sender = self.clone();
        tokio::spawn(async move {
            match sender.send(pwm_val).await {
                Ok(()) => tracing::info!("✅ Device received PWM value {}", pwm_val),
                Err(e) => tracing::error!("❌ Error sending PWM value {}: {}", pwm_val, e),
            }
        })
    }
}

use crate::adapters::SliderControl;
use crate::core::command_sender::CommandSender;
use crate::core::reflector::Reflector;
use crate::domain::model::SliderEvent;
use tokio::task::JoinHandle;

/// Routes slider events: every move is reflected locally, only a release
/// reaches the device.
pub struct SliderController {
    slider: SliderControl,
    reflector: Reflector,
    sender: Option<CommandSender>,
}

impl SliderController {
    pub fn new(slider: SliderControl, reflector: Reflector, sender: Option<CommandSender>) -> Self {
        Self {
            slider,
            reflector,
            sender,
        }
    }

    pub fn slider(&self) -> &SliderControl {
        &self.slider
    }

    /// 依目前滑桿值更新顯示 (啟動時使用)
    pub fn reflect_current(&self) {
        self.reflector.reflect(self.slider.value());
    }

    /// Returns the POST task spawned for a release, if any.
    pub fn handle(&self, event: SliderEvent) -> Option<JoinHandle<()>> {
        match event {
            SliderEvent::Input(value) => {
                let value = self.slider.set(value);
                self.reflector.reflect(value);
                None
            }
            SliderEvent::Change(value) => {
                let value = self.slider.set(value);
                match &self.sender {
                    Some(sender) => Some(sender.dispatch(value)),
                    None => {
                        tracing::info!("PWM set to {} (simulated, nothing sent)", value);
                        None
                    }
                }
            }
        }
    }
}

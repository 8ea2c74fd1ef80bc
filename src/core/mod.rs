pub mod command_sender;
pub mod console;
pub mod controls;
pub mod dashboard;
pub mod device_source;
pub mod poller;
pub mod reflector;
pub mod simulator;

pub use crate::domain::model::{ElementLayout, SliderEvent, SourceMode};
pub use crate::domain::ports::{ConfigProvider, SensorSource};
pub use crate::utils::error::Result;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DeviceClient, DisplayBoard, SliderControl};
pub use config::toml_config::TomlConfig;
pub use crate::core::dashboard::Dashboard;
pub use domain::model::{ElementLayout, PwmCommand, SliderEvent, SourceMode};
pub use utils::error::{DashboardError, Result};

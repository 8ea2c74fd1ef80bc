// Adapters layer: concrete implementations for external systems (device HTTP API, display board).

pub mod display;
pub mod http;

pub use display::{DisplayBoard, Element, SliderControl};
pub use http::DeviceClient;

use serde::{Deserialize, Serialize};

pub const TEMPERATURE_ENDPOINT: &str = "/lm35Sensor.json";
pub const WIND_ENDPOINT: &str = "/anemoSensor.json";
pub const PWM_ENDPOINT: &str = "/pwmValues.json";

/// `/lm35Sensor.json` 的回應, `temp` 缺少或為 null 時視為未定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    #[serde(default)]
    pub temp: Option<f64>,
}

/// `/anemoSensor.json` 的回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    #[serde(default)]
    pub wind: Option<f64>,
}

/// 送往 `/pwmValues.json` 的 PWM 佔空比 (0-100, 送出前不檢查範圍)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwmCommand {
    pub pwm_val: i64,
}

impl PwmCommand {
    pub fn new(pwm_val: i64) -> Self {
        Self { pwm_val }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedReadings {
    pub temperature: f64,
    pub humidity: f64,
    pub air_pressure: i64,
}

/// Slider events as the page delivers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    /// 拖曳中的每一次移動
    Input(i64),
    /// 放開滑桿 (數值確定)
    Change(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SourceMode {
    #[default]
    Device,
    Simulated,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Simulated => write!(f, "simulated"),
        }
    }
}

/// Element IDs the dashboard writes to.
///
/// The device page and the simulator page use different ID sets; both are
/// configurations of the same dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementLayout {
    pub temperature: String,
    /// Wind speed on the device page, air pressure on the simulator page.
    pub air_speed: String,
    pub humidity: Option<String>,
    pub slider: String,
    pub percentage: String,
    pub bar: String,
}

impl ElementLayout {
    pub fn device() -> Self {
        Self {
            temperature: "temperature-value".to_string(),
            air_speed: "air-speed-value".to_string(),
            humidity: None,
            slider: "pwm-slider".to_string(),
            percentage: "pwm-percentage-value".to_string(),
            bar: "pwm-bar".to_string(),
        }
    }

    pub fn simulator() -> Self {
        Self {
            temperature: "temperature".to_string(),
            air_speed: "air-pressure".to_string(),
            humidity: Some("humidity".to_string()),
            slider: "pwmSlider".to_string(),
            percentage: "pwm-percentage".to_string(),
            bar: "pwmBar".to_string(),
        }
    }

    pub fn for_mode(mode: SourceMode) -> Self {
        match mode {
            SourceMode::Device => Self::device(),
            SourceMode::Simulated => Self::simulator(),
        }
    }
}

/// One decimal place, ties rounded away from zero like the page's `toFixed(1)`.
///
/// A double sits exactly halfway between two tenths only when it is an odd
/// number of quarters (x.25 / x.75); everything else `{:.1}` already rounds
/// to the nearest tenth.
pub fn format_one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let exact_tie = value.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    if exact_tie {
        // f64::round 對 .5 向遠離零的方向進位
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{} \u{00B0}C", format_one_decimal(celsius))
}

pub fn format_wind(kmh: f64) -> String {
    format!("{} km/h", format_one_decimal(kmh))
}

pub fn format_humidity(percent: f64) -> String {
    format!("{} %", format_one_decimal(percent))
}

pub fn format_air_pressure(kmh: i64) -> String {
    format!("{} km/h", kmh)
}

pub fn format_percentage(value: i64) -> String {
    format!("{}%", value)
}

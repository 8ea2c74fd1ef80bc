use crate::core::ConfigProvider;
use crate::domain::model::{ElementLayout, SourceMode};
use crate::utils::error::{DashboardError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_min_value, validate_non_empty_string, validate_slider_bounds, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://192.168.4.1";
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const MIN_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub mode: Option<SourceMode>,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub simulator: Option<SimulatorConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollConfig {
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub initial: Option<i64>,
}

/// 元素 ID: 先取 preset (預設跟隨 mode), 再套用個別覆寫
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub preset: Option<SourceMode>,
    pub temperature: Option<String>,
    pub air_speed: Option<String>,
    pub humidity: Option<String>,
    pub slider: Option<String>,
    pub percentage: Option<String>,
    pub bar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulatorConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${THRUSTER_URL}), 未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("device.base_url", &self.device.base_url)?;

        if let Some(interval) = self.poll.interval_ms {
            validate_min_value("poll.interval_ms", interval, MIN_INTERVAL_MS)?;
        }
        if let Some(timeout) = self.device.request_timeout_seconds {
            validate_min_value("device.request_timeout_seconds", timeout, 1)?;
        }

        validate_slider_bounds(self.slider_min(), self.slider_max(), self.initial_pwm())?;

        let layout = self.layout();
        for (field, id) in [
            ("display.temperature", &layout.temperature),
            ("display.air_speed", &layout.air_speed),
            ("display.slider", &layout.slider),
            ("display.percentage", &layout.percentage),
            ("display.bar", &layout.bar),
        ] {
            validate_non_empty_string(field, id)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            format
                .parse::<LogFormat>()
                .map_err(|reason| DashboardError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason,
                })?;
        }

        Ok(())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.device.base_url
    }

    fn mode(&self) -> SourceMode {
        self.mode.unwrap_or_default()
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS))
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.device.request_timeout_seconds.map(Duration::from_secs)
    }

    fn slider_min(&self) -> i64 {
        self.slider.min.unwrap_or(0)
    }

    fn slider_max(&self) -> i64 {
        self.slider.max.unwrap_or(100)
    }

    fn initial_pwm(&self) -> i64 {
        self.slider.initial.unwrap_or_else(|| self.slider_min())
    }

    fn layout(&self) -> ElementLayout {
        let display = &self.display;
        let mut layout = ElementLayout::for_mode(display.preset.unwrap_or(self.mode()));

        if let Some(id) = &display.temperature {
            layout.temperature = id.clone();
        }
        if let Some(id) = &display.air_speed {
            layout.air_speed = id.clone();
        }
        if let Some(id) = &display.humidity {
            layout.humidity = Some(id.clone());
        }
        if let Some(id) = &display.slider {
            layout.slider = id.clone();
        }
        if let Some(id) = &display.percentage {
            layout.percentage = id.clone();
        }
        if let Some(id) = &display.bar {
            layout.bar = id.clone();
        }
        layout
    }

    fn simulator_seed(&self) -> Option<u64> {
        self.simulator.as_ref().and_then(|s| s.seed)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

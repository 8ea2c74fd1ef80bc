pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::{TomlConfig, DEFAULT_BASE_URL, DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS};
    use crate::core::ConfigProvider;
    use crate::domain::model::{ElementLayout, SourceMode};
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{
        validate_min_value, validate_slider_bounds, validate_url, Validate,
    };
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "thruster-dashboard")]
    #[command(about = "Live dashboard and PWM control for the ionic thruster")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Device base URL [default: http://192.168.4.1]
        #[arg(long)]
        pub base_url: Option<String>,

        /// Sensor source [default: device]
        #[arg(long, value_enum)]
        pub mode: Option<SourceMode>,

        /// Poll interval in milliseconds [default: 2000]
        #[arg(long)]
        pub interval_ms: Option<u64>,

        /// Abort device requests after this many seconds
        #[arg(long)]
        pub timeout_secs: Option<u64>,

        /// Slider position at startup
        #[arg(long)]
        pub initial_pwm: Option<i64>,

        /// Seed for the simulated readings
        #[arg(long)]
        pub seed: Option<u64>,

        /// Log output format: compact or json
        #[arg(long)]
        pub log_format: Option<LogFormat>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// 命令列參數覆蓋 TOML 設定
        pub fn apply_to(&self, config: &mut TomlConfig) {
            if let Some(base_url) = &self.base_url {
                config.device.base_url = base_url.clone();
            }
            if let Some(mode) = self.mode {
                config.mode = Some(mode);
            }
            if let Some(interval) = self.interval_ms {
                config.poll.interval_ms = Some(interval);
            }
            if let Some(timeout) = self.timeout_secs {
                config.device.request_timeout_seconds = Some(timeout);
            }
            if let Some(initial) = self.initial_pwm {
                config.slider.initial = Some(initial);
            }
            if let Some(seed) = self.seed {
                config.simulator.get_or_insert_with(Default::default).seed = Some(seed);
            }
            if self.log_format.is_some() || self.verbose {
                let logging = config.logging.get_or_insert_with(Default::default);
                if let Some(format) = self.log_format {
                    logging.format = Some(
                        match format {
                            LogFormat::Compact => "compact",
                            LogFormat::Json => "json",
                        }
                        .to_string(),
                    );
                }
                if self.verbose {
                    logging.verbose = Some(true);
                }
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn base_url(&self) -> &str {
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
        }

        fn mode(&self) -> SourceMode {
            self.mode.unwrap_or_default()
        }

        fn poll_interval(&self) -> Duration {
            Duration::from_millis(self.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS))
        }

        fn request_timeout(&self) -> Option<Duration> {
            self.timeout_secs.map(Duration::from_secs)
        }

        fn slider_min(&self) -> i64 {
            0
        }

        fn slider_max(&self) -> i64 {
            100
        }

        fn initial_pwm(&self) -> i64 {
            self.initial_pwm.unwrap_or(0)
        }

        fn layout(&self) -> ElementLayout {
            ElementLayout::for_mode(self.mode())
        }

        fn simulator_seed(&self) -> Option<u64> {
            self.seed
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("--base-url", self.base_url())?;
            if let Some(interval) = self.interval_ms {
                validate_min_value("--interval-ms", interval, MIN_INTERVAL_MS)?;
            }
            validate_slider_bounds(self.slider_min(), self.slider_max(), self.initial_pwm())
        }
    }

}

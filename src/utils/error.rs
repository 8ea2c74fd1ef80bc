use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Device request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Device returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Response from {endpoint} has no '{field}' value")]
    MissingField { endpoint: String, field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Console command error: {message}")]
    ConsoleError { message: String },
}

impl DashboardError {
    /// 請求失敗 (網路或 HTTP 狀態)
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }

    /// 回應格式錯誤 (無法解析或缺少欄位)
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponse { .. } | Self::MissingField { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            Self::ConfigValidationError { field, .. } => {
                format!("The configuration could not be read ({})", field)
            }
            Self::IoError(_) => "A file could not be read".to_string(),
            Self::Request(_) | Self::Status { .. } => "The device could not be reached".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidConfigValueError { reason, .. } => reason.clone(),
            Self::ConfigValidationError { .. } => {
                "Check the TOML syntax and the section names of the config file".to_string()
            }
            Self::ConfigError { .. } | Self::IoError(_) => {
                "Make sure the config file exists and is readable".to_string()
            }
            Self::Request(_) | Self::Status { .. } => {
                "Check that the device is powered and the base URL is correct".to_string()
            }
            _ => "Run again with --verbose for more details".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_taxonomy() {
        let status = DashboardError::Status {
            endpoint: "/lm35Sensor.json".to_string(),
            status: 500,
        };
        assert!(status.is_request_failure());
        assert!(!status.is_malformed_response());

        let missing = DashboardError::MissingField {
            endpoint: "/anemoSensor.json".to_string(),
            field: "wind".to_string(),
        };
        assert!(missing.is_malformed_response());
        assert!(!missing.is_request_failure());
        assert_eq!(
            missing.to_string(),
            "Response from /anemoSensor.json has no 'wind' value"
        );
    }

    #[test]
    fn test_invalid_value_suggestion_uses_reason() {
        let err = DashboardError::InvalidConfigValueError {
            field: "poll.interval_ms".to_string(),
            value: "5".to_string(),
            reason: "Value must be at least 100".to_string(),
        };
        assert_eq!(err.recovery_suggestion(), "Value must be at least 100");
        assert!(err.user_friendly_message().contains("poll.interval_ms"));
    }
}

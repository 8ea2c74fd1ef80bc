use crate::domain::model::{
    PwmCommand, TemperatureReading, WindReading, PWM_ENDPOINT, TEMPERATURE_ENDPOINT,
    WIND_ENDPOINT,
};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::validate_url;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP client for the thruster firmware's JSON endpoints.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: Url,
}

impl DeviceClient {
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self> {
        let base_url = validate_url("device.base_url", base_url)?;

        // 預設不設逾時: 卡住的請求不會被中止
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DashboardError::ConfigError {
                message: format!("cannot build URL for {}: {}", path, e),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| DashboardError::MalformedResponse {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn fetch_temperature(&self) -> Result<f64> {
        let reading: TemperatureReading = self.get_json(TEMPERATURE_ENDPOINT).await?;
        reading.temp.ok_or_else(|| DashboardError::MissingField {
            endpoint: TEMPERATURE_ENDPOINT.to_string(),
            field: "temp".to_string(),
        })
    }

    pub async fn fetch_wind(&self) -> Result<f64> {
        let reading: WindReading = self.get_json(WIND_ENDPOINT).await?;
        reading.wind.ok_or_else(|| DashboardError::MissingField {
            endpoint: WIND_ENDPOINT.to_string(),
            field: "wind".to_string(),
        })
    }

    /// POST `{"pwm_val": v}`; the response body is ignored.
    pub async fn send_pwm(&self, command: PwmCommand) -> Result<()> {
        let url = self.endpoint(PWM_ENDPOINT)?;
        tracing::debug!("POST {} {:?}", url, command);

        let response = self.client.post(url).json(&command).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                endpoint: PWM_ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(DeviceClient::new("ftp://192.168.4.1", None).is_err());
        assert!(DeviceClient::new("not a url", None).is_err());
    }

    #[test]
    fn test_endpoints_resolve_from_device_root() {
        let client = DeviceClient::new("http://192.168.4.1/ui/", None).unwrap();
        assert_eq!(
            client.endpoint(TEMPERATURE_ENDPOINT).unwrap().as_str(),
            "http://192.168.4.1/lm35Sensor.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_temperature_errors() {
        let server = MockServer::start();
        let client = DeviceClient::new(&server.base_url(), None).unwrap();

        let mut not_json = server.mock(|when, then| {
            when.method(GET).path(TEMPERATURE_ENDPOINT);
            then.status(200).body("<html>busy</html>");
        });
        let err = client.fetch_temperature().await.unwrap_err();
        assert!(err.is_malformed_response());
        not_json.delete();

        let missing = server.mock(|when, then| {
            when.method(GET).path(TEMPERATURE_ENDPOINT);
            then.status(200).json_body(serde_json::json!({ "wind": 3.0 }));
        });
        let err = client.fetch_temperature().await.unwrap_err();
        assert!(matches!(err, DashboardError::MissingField { ref field, .. } if field == "temp"));
        missing.assert();
    }

    #[tokio::test]
    async fn test_send_pwm_reports_http_status() {
        let server = MockServer::start();
        let client = DeviceClient::new(&server.base_url(), None).unwrap();

        let mock = server.mock(|when, then| {
            when.method(POST).path(PWM_ENDPOINT);
            then.status(500);
        });

        let err = client.send_pwm(PwmCommand::new(10)).await.unwrap_err();
        assert!(matches!(err, DashboardError::Status { status: 500, .. }));
        mock.assert();
    }
}

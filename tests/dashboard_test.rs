use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use thruster_dashboard::{Dashboard, SliderEvent, SourceMode, TomlConfig};

#[tokio::test(start_paused = true)]
async fn test_simulated_dashboard_tracks_slider() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
mode = "simulated"

[simulator]
seed = 11
"#,
    )?;

    let mut dashboard = Dashboard::setup(&config)?;
    assert_eq!(dashboard.mode(), SourceMode::Simulated);
    // 啟動時先依滑桿初始值繪製
    assert_eq!(dashboard.board().text("pwm-percentage").as_deref(), Some("0%"));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(dashboard.board().text("air-pressure").as_deref(), Some("500 km/h"));

    dashboard.handle_slider(SliderEvent::Input(50));
    dashboard.handle_slider(SliderEvent::Change(50));
    assert_eq!(dashboard.board().width("pwmBar"), Some(50));

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(dashboard.board().text("air-pressure").as_deref(), Some("1250 km/h"));

    let temperature = dashboard.board().text("temperature").unwrap_or_default();
    let celsius: f64 = temperature.trim_end_matches(" °C").parse()?;
    assert!((20.0..=30.0).contains(&celsius));

    dashboard.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn test_device_dashboard_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let temp_mock = server.mock(|when, then| {
        when.method(GET).path("/lm35Sensor.json");
        then.status(200).json_body(serde_json::json!({ "temp": 24.04 }));
    });
    let wind_mock = server.mock(|when, then| {
        when.method(GET).path("/anemoSensor.json");
        then.status(200).json_body(serde_json::json!({ "wind": 15.55 }));
    });
    let pwm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pwmValues.json")
            .json_body(serde_json::json!({ "pwm_val": 75 }));
        then.status(200);
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[device]
base_url = "{}"

[poll]
interval_ms = 100

[slider]
initial = 25
"#,
        server.base_url()
    ))?;

    let mut dashboard = Dashboard::setup(&config)?;
    assert!(dashboard.is_polling());
    assert_eq!(
        dashboard.board().text("pwm-percentage-value").as_deref(),
        Some("25%")
    );

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(
        dashboard.board().text("temperature-value").as_deref(),
        Some("24.0 °C")
    );
    assert_eq!(
        dashboard.board().text("air-speed-value").as_deref(),
        Some("15.6 km/h")
    );
    assert!(temp_mock.hits() >= 2);
    assert!(wind_mock.hits() >= 2);

    dashboard.handle_slider(SliderEvent::Input(75));
    dashboard.handle_slider(SliderEvent::Change(75));
    assert_eq!(dashboard.slider_value(), 75);

    dashboard.shutdown().await;
    pwm_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_shutdown_does_not_wait_for_hung_command() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/pwmValues.json");
        then.status(200).delay(Duration::from_secs(10));
    });

    let config = TomlConfig::from_toml_str(&format!(
        "[device]\nbase_url = \"{}\"\n",
        server.base_url()
    ))?;

    let mut dashboard = Dashboard::setup(&config)?;
    dashboard.handle_slider(SliderEvent::Input(60));
    dashboard.handle_slider(SliderEvent::Change(60));

    let started = std::time::Instant::now();
    dashboard
        .shutdown_with_grace(Duration::from_millis(200))
        .await;

    // 裝置沒有回應時不會卡到 TCP 逾時
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
}

#[tokio::test]
async fn test_setup_rejects_zero_interval() -> Result<()> {
    // 沒有經過 validate() 的設定
    let config = TomlConfig::from_toml_str("mode = \"simulated\"\n\n[poll]\ninterval_ms = 0\n")?;

    let err = match Dashboard::setup(&config) {
        Ok(_) => panic!("a zero poll interval must be rejected"),
        Err(e) => e,
    };
    assert!(matches!(
        err,
        thruster_dashboard::DashboardError::InvalidConfigValueError { .. }
    ));
    Ok(())
}

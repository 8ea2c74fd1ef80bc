use anyhow::Result;
use httpmock::prelude::*;
use thruster_dashboard::core::command_sender::CommandSender;
use thruster_dashboard::core::controls::SliderController;
use thruster_dashboard::core::reflector::Reflector;
use thruster_dashboard::{DeviceClient, DisplayBoard, ElementLayout, SliderControl, SliderEvent};

fn controller(server: &MockServer) -> Result<(SliderController, DisplayBoard)> {
    let board = DisplayBoard::new();
    let client = DeviceClient::new(&server.base_url(), None)?;
    let controller = SliderController::new(
        SliderControl::default(),
        Reflector::new(board.clone(), &ElementLayout::device()),
        Some(CommandSender::new(client)),
    );
    Ok((controller, board))
}

#[tokio::test]
async fn test_drag_then_release_sends_one_command() -> Result<()> {
    let server = MockServer::start();
    let pwm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pwmValues.json")
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "pwm_val": 75 }));
        then.status(200);
    });

    let (controller, board) = controller(&server)?;

    for value in [10, 40, 75] {
        assert!(controller.handle(SliderEvent::Input(value)).is_none());
    }
    assert_eq!(board.text("pwm-percentage-value").as_deref(), Some("75%"));
    assert_eq!(board.width("pwm-bar"), Some(75));
    assert_eq!(pwm_mock.hits(), 0);

    let task = controller
        .handle(SliderEvent::Change(75))
        .expect("release should dispatch a command");
    task.await?;

    pwm_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_moves_never_touch_the_network() -> Result<()> {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.path_contains("");
        then.status(200);
    });

    let (controller, board) = controller(&server)?;
    for value in 0..=100 {
        controller.handle(SliderEvent::Input(value));
        assert_eq!(board.text("pwm-percentage-value"), Some(format!("{}%", value)));
        assert_eq!(board.width("pwm-bar"), Some(value));
    }

    tokio::task::yield_now().await;
    assert_eq!(any_request.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_post_is_terminal() -> Result<()> {
    let server = MockServer::start();
    let pwm_mock = server.mock(|when, then| {
        when.method(POST).path("/pwmValues.json");
        then.status(503);
    });

    let (controller, board) = controller(&server)?;
    controller.handle(SliderEvent::Input(20));
    if let Some(task) = controller.handle(SliderEvent::Change(20)) {
        task.await?;
    }

    // 一次請求, 不重試, 畫面也不回滾
    pwm_mock.assert_hits(1);
    assert_eq!(board.text("pwm-percentage-value").as_deref(), Some("20%"));
    assert_eq!(controller.slider().value(), 20);
    Ok(())
}

#[tokio::test]
async fn test_send_reports_outcome() -> Result<()> {
    let server = MockServer::start();
    let pwm_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/pwmValues.json")
            .json_body(serde_json::json!({ "pwm_val": 0 }));
        then.status(200).body("ignored");
    });

    let client = DeviceClient::new(&server.base_url(), None)?;
    CommandSender::new(client).send(0).await?;

    pwm_mock.assert();
    Ok(())
}

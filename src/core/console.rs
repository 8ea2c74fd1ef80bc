use crate::core::dashboard::Dashboard;
use crate::domain::model::SliderEvent;
use crate::utils::error::{DashboardError, Result};
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// 拖曳到某個值 (只更新顯示)
    Drag(i64),
    /// 在目前位置放開
    Release,
    /// 拖曳後立即放開
    Set(i64),
    Status,
    Quit,
}

pub const HELP: &str = "commands: drag <0-100> | release | set <0-100> | status | quit";

pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "drag" | "move" => ConsoleCommand::Drag(parse_value(verb, words.next())?),
        "release" => ConsoleCommand::Release,
        "set" => ConsoleCommand::Set(parse_value(verb, words.next())?),
        "status" => ConsoleCommand::Status,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            return Err(DashboardError::ConsoleError {
                message: format!("unknown command '{}'; {}", other, HELP),
            })
        }
    };

    if let Some(extra) = words.next() {
        return Err(DashboardError::ConsoleError {
            message: format!("unexpected argument '{}' after {}", extra, verb),
        });
    }

    Ok(Some(command))
}

fn parse_value(verb: &str, word: Option<&str>) -> Result<i64> {
    let word = word.ok_or_else(|| DashboardError::ConsoleError {
        message: format!("{} needs a value", verb),
    })?;
    // 滑桿的 value 是字串, 和頁面一樣取整數部分
    word.trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .ok_or_else(|| DashboardError::ConsoleError {
            message: format!("'{}' is not a number", word),
        })
}

/// Applies one parsed command. Returns `false` on `quit`.
fn apply<W: Write>(dashboard: &mut Dashboard, command: ConsoleCommand, out: &mut W) -> Result<bool> {
    match command {
        ConsoleCommand::Drag(value) => dashboard.handle_slider(SliderEvent::Input(value)),
        ConsoleCommand::Release => {
            let value = dashboard.slider_value();
            dashboard.handle_slider(SliderEvent::Change(value));
        }
        ConsoleCommand::Set(value) => {
            dashboard.handle_slider(SliderEvent::Input(value));
            dashboard.handle_slider(SliderEvent::Change(value));
        }
        ConsoleCommand::Status => writeln!(out, "{}", dashboard.board().render_line())?,
        ConsoleCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Console loop: prints a frame whenever the board changes and feeds input
/// lines to the slider until `quit` or `stop` resolves.
///
/// Input reaching EOF only ends command handling; rendering continues.
pub async fn run_console<R, W, S>(
    dashboard: &mut Dashboard,
    input: R,
    out: &mut W,
    frame_interval: Duration,
    stop: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut screen = tokio::time::interval(frame_interval);
    let mut last_frame = String::new();
    let mut input_open = true;
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => {
                tracing::info!("Interrupted");
                break;
            }
            _ = screen.tick() => {
                let frame = dashboard.board().render();
                if frame != last_frame {
                    writeln!(out, "{}", dashboard.board().render_line())?;
                    last_frame = frame;
                }
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    // stdin 關閉時繼續輪詢和繪製, 直到 Ctrl-C
                    tracing::info!("stdin closed, press Ctrl-C to stop");
                    input_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if !apply(dashboard, command, out)? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }
    Ok(())
}

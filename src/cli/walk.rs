//! Interactive walkthrough against a simulated host screen.
//!
//! Reads one command per line from stdin and prints the resulting overlay
//! frame as JSON. Ends when the tour is no longer active or stdin closes.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use wp_app::TourController;
use wp_core::ports::KeyInput;
use wp_core::{Size, TourId, TourState, UserId};

use super::HostLayout;
use crate::bootstrap::{wire_dependencies, AppConfig};

/// Time given to step-scoped background work (keys, relocation) before the
/// frame is printed.
const SETTLE: Duration = Duration::from_millis(20);

const HELP: &str = "commands: next | prev | skip | end | done | key <Name> | resize <w> <h> | \
scroll | measure <w> <h> | retry | move <selector> <left> <top> <width> <height> | quit";

#[derive(Debug, Clone, PartialEq)]
enum WalkCommand {
    Next,
    Prev,
    Skip,
    End,
    Done,
    Key(KeyInput),
    Resize(Size),
    Scroll,
    Measure(Size),
    Retry,
    Move {
        selector: String,
        rect: wp_core::Rect,
    },
    Quit,
}

fn parse_command(line: &str) -> Result<WalkCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Err(HELP.to_string());
    };
    let mut number = |name: &str| -> Result<f64, String> {
        parts
            .next()
            .ok_or_else(|| format!("missing {name}"))?
            .parse::<f64>()
            .map_err(|e| format!("invalid {name}: {e}"))
    };

    let command = match verb {
        "n" | "next" => WalkCommand::Next,
        "p" | "prev" => WalkCommand::Prev,
        "s" | "skip" => WalkCommand::Skip,
        "e" | "end" => WalkCommand::End,
        "d" | "done" => WalkCommand::Done,
        "scroll" => WalkCommand::Scroll,
        "retry" => WalkCommand::Retry,
        "q" | "quit" => WalkCommand::Quit,
        "resize" => WalkCommand::Resize(Size::new(number("width")?, number("height")?)),
        "measure" => WalkCommand::Measure(Size::new(number("width")?, number("height")?)),
        "key" => {
            let name = line
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| "missing key name".to_string())?;
            WalkCommand::Key(KeyInput::from_key_name(name))
        }
        "move" => {
            let selector = line
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| "missing selector".to_string())?
                .to_string();
            let values = line
                .split_whitespace()
                .skip(2)
                .map(|v| v.parse::<f64>().map_err(|e| format!("invalid number {v}: {e}")))
                .collect::<Result<Vec<_>, _>>()?;
            let [left, top, width, height] = values[..] else {
                return Err("move needs <left> <top> <width> <height>".to_string());
            };
            WalkCommand::Move {
                selector,
                rect: wp_core::Rect::new(left, top, width, height),
            }
        }
        _ => return Err(HELP.to_string()),
    };
    Ok(command)
}

pub(super) async fn run_walk(
    config: &AppConfig,
    user: UserId,
    tour: TourId,
    layout: Option<PathBuf>,
) -> anyhow::Result<()> {
    let catalog = crate::bootstrap::wiring::build_catalog()?;
    let layout = match layout {
        Some(path) => HostLayout::load(&path)?,
        None => HostLayout::synthetic(&catalog, Size::new(1280.0, 800.0)),
    };
    let wired = wire_dependencies(config, layout.into_screen())?;
    let registry = wired.registry.clone();
    let viewport = wired.viewport.clone();

    let controller = TourController::login(user, wired.deps).await;
    let state = controller.help().replay(tour).await?;
    info!(%tour, ?state, "walkthrough started");
    print_frame(&controller)?;
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !controller.state().is_idle() {
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let result = match command {
            WalkCommand::Next => controller.next().await.map(|_| ()),
            WalkCommand::Prev => controller.prev().await.map(|_| ()),
            WalkCommand::Skip => controller.skip().await.map(|_| ()),
            WalkCommand::End => controller.end().await.map(|_| ()),
            WalkCommand::Done => controller.next_deferred().await.map(|_| ()),
            WalkCommand::Key(key) => {
                viewport.key_down(key);
                Ok(())
            }
            WalkCommand::Resize(size) => {
                viewport.resize(size);
                Ok(())
            }
            WalkCommand::Scroll => {
                viewport.scroll();
                Ok(())
            }
            WalkCommand::Measure(size) => {
                controller.report_tooltip_size(size);
                Ok(())
            }
            WalkCommand::Retry => {
                controller.retry_target().await;
                Ok(())
            }
            WalkCommand::Move { selector, rect } => {
                registry.set(selector, rect).await;
                viewport.scroll();
                Ok(())
            }
            WalkCommand::Quit => {
                controller.end().await?;
                break;
            }
        };
        if let Err(err) = result {
            eprintln!("warning: {err}");
        }

        tokio::time::sleep(SETTLE).await;
        if matches!(controller.state(), TourState::Closing { .. }) {
            print_frame(&controller)?;
            wait_until_idle(&controller).await;
        }
        print_frame(&controller)?;
    }

    println!(
        "completed {}/{} tours",
        controller.completed_count(),
        controller.total_tours()
    );
    controller.logout().await;
    Ok(())
}

async fn wait_until_idle(controller: &TourController) {
    let mut states = controller.subscribe_state();
    let _ = states.wait_for(|state| state.is_idle()).await;
}

fn print_frame(controller: &TourController) -> anyhow::Result<()> {
    let frame = controller.frame();
    println!(
        "{}",
        serde_json::to_string_pretty(&frame).context("Failed to serialize overlay frame")?
    );
    Ok(())
}

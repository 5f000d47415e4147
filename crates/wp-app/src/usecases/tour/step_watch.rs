//! Per-step viewport subscription.
//!
//! One `StepWatch` exists per activated step. It owns the only viewport
//! subscription of that step; stopping or dropping it detaches the
//! subscription.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use wp_core::ports::{KeyInput, ViewportEvent, ViewportPort};
use wp_core::TourSettings;

use super::TargetResolver;
use crate::presentation::{OverlayFrame, StepStatus};

/// Work the step watch hands back to the controller.
#[derive(Debug)]
pub(crate) enum TourCommand {
    Key { generation: u64, key: KeyInput },
    CloseElapsed { generation: u64 },
}

pub(crate) struct StepWatchContext {
    pub generation: u64,
    pub selector: String,
    pub resolver: TargetResolver,
    pub viewport: Arc<dyn ViewportPort>,
    pub settings: TourSettings,
    pub frames: Arc<watch::Sender<OverlayFrame>>,
    pub commands: mpsc::UnboundedSender<TourCommand>,
}

pub(crate) struct StepWatch {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl StepWatch {
    /// Subscribe before returning so no event published after activation is
    /// missed.
    pub fn spawn(ctx: StepWatchContext) -> Self {
        let events = ctx.viewport.subscribe();
        let generation = ctx.generation;
        let task = tokio::spawn(run(ctx, events));
        debug!(generation, "step watch attached");
        Self {
            generation,
            task: Some(task),
        }
    }

    /// Detach and wait until the subscription is gone.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            debug!(generation = self.generation, "step watch detached");
        }
    }
}

impl Drop for StepWatch {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(ctx: StepWatchContext, mut events: broadcast::Receiver<ViewportEvent>) {
    let reveal = tokio::time::sleep(ctx.settings.content_reveal_delay());
    tokio::pin!(reveal);
    let mut revealed = false;

    loop {
        tokio::select! {
            _ = &mut reveal, if !revealed => {
                revealed = true;
                ctx.frames.send_if_modified(|frame| {
                    if frame.generation != ctx.generation || frame.content_revealed {
                        return false;
                    }
                    frame.content_revealed = true;
                    true
                });
            }
            event = events.recv() => match event {
                Ok(ViewportEvent::Resized { .. }) | Ok(ViewportEvent::Scrolled) => {
                    relocate(&ctx).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    trace!(skipped, "viewport events lagged, relocating");
                    relocate(&ctx).await;
                }
                Ok(ViewportEvent::KeyDown { key }) => {
                    let command = TourCommand::Key {
                        generation: ctx.generation,
                        key,
                    };
                    if ctx.commands.send(command).is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
}

/// Re-locate a found target. A missing target is only looked up again
/// through an explicit retry.
async fn relocate(ctx: &StepWatchContext) {
    let target_missing = {
        let frame = ctx.frames.borrow();
        frame.generation == ctx.generation && frame.status == StepStatus::TargetMissing
    };
    if target_missing {
        trace!(selector = %ctx.selector, "target missing, viewport event ignored");
        return;
    }

    let target = ctx.resolver.locate(&ctx.selector).await;
    let viewport = ctx.viewport.size();
    ctx.frames.send_if_modified(|frame| {
        if frame.generation != ctx.generation {
            return false;
        }
        let before = frame.clone();
        frame.place_target(target, viewport, &ctx.settings);
        *frame != before
    });
}

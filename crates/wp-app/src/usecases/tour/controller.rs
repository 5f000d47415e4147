//! Tour controller.
//!
//! This module coordinates the tour state machine and its side effects for
//! one logged-in user.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, info_span, warn, Instrument};
use wp_core::ports::{KeyInput, NavigationPort, ViewportPort};
use wp_core::{
    Milestone, MissingTargetPolicy, OnboardingState, PlacementResult, Rect, Size, TourAction,
    TourCatalog, TourEvent, TourId, TourSettings, TourState, TourStateMachine, UserId,
};

use super::context::TourContext;
use super::step_watch::{StepWatch, StepWatchContext, TourCommand};
use super::{TargetResolver, TourError, TourHelp};
use crate::deps::TourDeps;
use crate::presentation::{EnhancementSupervisor, OverlayFrame, StepView};
use crate::usecases::onboarding::{
    LoadOnboardingState, MarkMilestone, MarkTourCompleted, ResetTour,
};

/// Drives the active tour session of one user.
///
/// Cloning is cheap; clones share the session. Construct with
/// [`TourController::login`] and tear down with [`TourController::logout`].
#[derive(Clone)]
pub struct TourController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    user: UserId,
    catalog: Arc<TourCatalog>,
    settings: TourSettings,
    context: TourContext,

    // Cached onboarding record; updated before every write.
    onboarding: watch::Sender<OnboardingState>,
    // Milestones set in the cache whose last write failed.
    unsynced_milestones: Mutex<HashSet<Milestone>>,
    frames: Arc<watch::Sender<OverlayFrame>>,
    generation: AtomicU64,
    logged_out: AtomicBool,

    step_watch: Mutex<Option<StepWatch>>,
    close_timer: Mutex<Option<AbortHandle>>,
    pump: Mutex<Option<JoinHandle<()>>>,
    commands: mpsc::UnboundedSender<TourCommand>,

    resolver: TargetResolver,
    navigation: Arc<dyn NavigationPort>,
    viewport: Arc<dyn ViewportPort>,
    enhancements: EnhancementSupervisor,

    mark_tour_completed: MarkTourCompleted,
    reset_tour: ResetTour,
    mark_milestone: MarkMilestone,
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(timer) = self.close_timer.get_mut().take() {
            timer.abort();
        }
        if let Some(pump) = self.pump.get_mut().take() {
            pump.abort();
        }
    }
}

impl TourController {
    /// Load (or create) the user's onboarding record and start an idle session.
    ///
    /// A store failure does not prevent login; the session starts from the
    /// default record.
    pub async fn login(user: UserId, deps: TourDeps) -> Self {
        let onboarding = match LoadOnboardingState::from_ports(deps.onboarding_store.clone())
            .execute(&user)
            .await
        {
            Ok(state) => state,
            Err(err) => {
                warn!(%user, error = %err, "loading onboarding state failed, using defaults");
                OnboardingState::default()
            }
        };

        let (onboarding, _) = watch::channel(onboarding);
        let (frames, _) = watch::channel(OverlayFrame::hidden(0, deps.viewport.size()));
        let (commands, receiver) = mpsc::unbounded_channel();

        let inner = Arc::new(ControllerInner {
            user,
            resolver: TargetResolver::new(
                deps.element_registry,
                deps.settings.target_retry_delay(),
            ),
            catalog: deps.catalog,
            settings: deps.settings,
            context: TourContext::new(TourState::Idle),
            onboarding,
            unsynced_milestones: Mutex::new(HashSet::new()),
            frames: Arc::new(frames),
            generation: AtomicU64::new(0),
            logged_out: AtomicBool::new(false),
            step_watch: Mutex::new(None),
            close_timer: Mutex::new(None),
            pump: Mutex::new(None),
            commands,
            navigation: deps.navigation,
            viewport: deps.viewport,
            enhancements: deps.enhancements,
            mark_tour_completed: MarkTourCompleted::from_ports(deps.onboarding_store.clone()),
            reset_tour: ResetTour::from_ports(deps.onboarding_store.clone()),
            mark_milestone: MarkMilestone::from_ports(deps.onboarding_store),
        });

        let pump = tokio::spawn(pump_commands(Arc::downgrade(&inner), receiver));
        *inner.pump.lock().await = Some(pump);

        info!(
            user = %inner.user,
            completed = inner.onboarding.borrow().completed_count(),
            total = OnboardingState::total_tours(),
            "tour controller ready"
        );
        Self { inner }
    }

    /// End any session, detach listeners and stop background work. The cached
    /// onboarding record is reset to defaults.
    pub async fn logout(&self) {
        if let Err(err) = self.dispatch(TourEvent::End, None).await {
            warn!(error = %err, "ending session on logout failed");
        }
        self.inner.logged_out.store(true, Ordering::SeqCst);
        self.cancel_close_timer().await;
        self.stop_step_watch().await;
        self.inner.onboarding.send_replace(OnboardingState::default());
        self.inner.unsynced_milestones.lock().await.clear();
        if let Some(pump) = self.inner.pump.lock().await.take() {
            pump.abort();
        }
        info!(user = %self.inner.user, "tour controller logged out");
    }

    // ===== Transitions =====

    pub async fn start(&self, tour_id: TourId) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::Start(tour_id), None).await
    }

    pub async fn next(&self) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::Next, None).await
    }

    /// Like [`next`](Self::next), but finishing the last step keeps it on
    /// screen for the completion delay before the session ends.
    pub async fn next_deferred(&self) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::NextDeferred, None).await
    }

    pub async fn prev(&self) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::Prev, None).await
    }

    /// Leave the tour. Recorded as completed, same as finishing it.
    pub async fn skip(&self) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::Skip, None).await
    }

    /// Leave the tour without recording anything.
    pub async fn end(&self) -> Result<TourState, TourError> {
        self.dispatch(TourEvent::End, None).await
    }

    /// Map a key press to a transition. Unmapped keys are ignored.
    pub async fn handle_key(&self, key: &KeyInput) -> Result<TourState, TourError> {
        match key_event(key) {
            Some(event) => self.dispatch(event, None).await,
            None => Ok(self.state()),
        }
    }

    // ===== Onboarding record =====

    /// Clear one tour's completion flag. An in-progress session is untouched.
    pub async fn reset_tour(&self, tour_id: TourId) -> Result<(), TourError> {
        self.inner
            .onboarding
            .send_modify(|state| state.set_tour_completed(tour_id, false));
        self.inner
            .reset_tour
            .execute(&self.inner.user, tour_id)
            .await
            .map_err(|err| {
                warn!(%tour_id, error = %err, "persisting tour reset failed");
                TourError::persistence(format!("reset of tour {tour_id}"), err)
            })
    }

    /// Record a tour as completed outside of a session. Always writes.
    pub async fn mark_tour_completed(&self, tour_id: TourId) -> Result<(), TourError> {
        self.persist_tour_completed(tour_id).await
    }

    /// Set a milestone. Returns whether anything was written; an already
    /// reached milestone is left alone. A milestone whose write failed is
    /// written again on the next call.
    pub async fn mark_milestone(&self, milestone: Milestone) -> Result<bool, TourError> {
        let mut unsynced = self.inner.unsynced_milestones.lock().await;
        let newly_reached = self.inner.onboarding.send_if_modified(|state| {
            if state.has_milestone(milestone) {
                return false;
            }
            state.set_milestone(milestone, true);
            true
        });
        if !newly_reached && !unsynced.contains(&milestone) {
            debug!(milestone = milestone.as_str(), "milestone already reached");
            return Ok(false);
        }

        match self
            .inner
            .mark_milestone
            .execute(&self.inner.user, milestone)
            .await
        {
            Ok(written) => {
                unsynced.remove(&milestone);
                Ok(written)
            }
            Err(err) => {
                unsynced.insert(milestone);
                warn!(milestone = milestone.as_str(), error = %err, "persisting milestone failed");
                Err(TourError::persistence(format!("milestone {milestone}"), err))
            }
        }
    }

    // ===== Queries =====

    pub fn user(&self) -> &UserId {
        &self.inner.user
    }

    pub fn catalog(&self) -> &TourCatalog {
        &self.inner.catalog
    }

    pub fn settings(&self) -> &TourSettings {
        &self.inner.settings
    }

    pub fn state(&self) -> TourState {
        self.inner.context.get_state()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<TourState> {
        self.inner.context.subscribe()
    }

    pub fn onboarding_state(&self) -> OnboardingState {
        self.inner.onboarding.borrow().clone()
    }

    pub fn is_tour_completed(&self, tour_id: TourId) -> bool {
        self.inner.onboarding.borrow().is_tour_completed(tour_id)
    }

    pub fn completed_count(&self) -> usize {
        self.inner.onboarding.borrow().completed_count()
    }

    pub fn total_tours(&self) -> usize {
        OnboardingState::total_tours()
    }

    pub fn frame(&self) -> OverlayFrame {
        self.inner.frames.borrow().clone()
    }

    pub fn subscribe_frames(&self) -> watch::Receiver<OverlayFrame> {
        self.inner.frames.subscribe()
    }

    pub fn current_placement(&self) -> Option<PlacementResult> {
        self.inner.frames.borrow().placement()
    }

    pub fn help(&self) -> TourHelp {
        TourHelp::new(self.clone())
    }

    pub(crate) fn navigation(&self) -> &Arc<dyn NavigationPort> {
        &self.inner.navigation
    }

    // ===== Host input =====

    /// Replace the estimated tooltip size with a measured one.
    pub fn report_tooltip_size(&self, size: Size) {
        let settings = &self.inner.settings;
        let changed = self
            .inner
            .frames
            .send_if_modified(|frame| frame.is_visible() && frame.set_tooltip_size(size, settings));
        if changed {
            debug!(width = size.width, height = size.height, "tooltip size reported");
        }
    }

    /// Resolve the active step's target again, including the delayed retry.
    pub async fn retry_target(&self) -> Option<Rect> {
        let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;
        let state = self.inner.context.get_state();
        let (tour_id, step_index) = (state.tour_id()?, state.step_index()?);
        let selector = self.inner.catalog.step(tour_id, step_index)?.target_selector.clone();
        let generation = self.inner.generation.load(Ordering::SeqCst);

        let target = self.inner.resolver.resolve(&selector).await;
        self.publish_target(generation, target);
        if target.is_none() {
            warn!(%tour_id, step_index, %selector, "target still missing after retry");
        }
        target
    }

    // ===== Dispatch =====

    async fn dispatch(
        &self,
        event: TourEvent,
        expected_generation: Option<u64>,
    ) -> Result<TourState, TourError> {
        // Serializes transitions together with their side effects.
        let _dispatch_guard = self.inner.context.acquire_dispatch_lock().await;

        if self.inner.logged_out.load(Ordering::SeqCst) {
            debug!(?event, "tour controller logged out, ignoring event");
            return Ok(self.inner.context.get_state());
        }
        if let Some(expected) = expected_generation {
            let generation = self.inner.generation.load(Ordering::SeqCst);
            if generation != expected {
                debug!(?event, expected, generation, "dropping stale step event");
                return Ok(self.inner.context.get_state());
            }
        }

        let span = info_span!("usecase.tour_controller.dispatch", event = ?event);
        async {
            let mut current = self.inner.context.get_state();
            let mut pending_events = vec![event];
            let mut failures = Vec::new();

            while let Some(event) = pending_events.pop() {
                let from = current;
                let (next, actions) =
                    TourStateMachine::transition(current, event, &self.inner.catalog);
                if next == from && actions.is_empty() {
                    debug!(state = ?from, ?event, "tour event ignored");
                    continue;
                }
                info!(from = ?from, to = ?next, event = ?event, "tour state transition");

                if matches!(from, TourState::Closing { .. })
                    && !matches!(next, TourState::Closing { .. })
                {
                    self.cancel_close_timer().await;
                }

                // Applied before side effects; a failed write does not roll back.
                self.inner.context.set_state(next);
                current = next;

                let follow_up_events = self.execute_actions(actions, &mut failures).await;
                pending_events.extend(follow_up_events);
            }

            match failures.into_iter().next() {
                Some(err) => Err(err),
                None => Ok(current),
            }
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<TourAction>,
        failures: &mut Vec<TourError>,
    ) -> Vec<TourEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "tour executing action");
            match action {
                TourAction::ActivateStep {
                    tour_id,
                    step_index,
                } => {
                    if let Some(event) = self.activate_step(tour_id, step_index).await {
                        follow_up_events.push(event);
                    }
                }
                TourAction::DeactivateStep => {
                    self.deactivate_step().await;
                }
                TourAction::PersistTourCompleted { tour_id } => {
                    if let Err(err) = self.persist_tour_completed(tour_id).await {
                        failures.push(err);
                    }
                }
                TourAction::ScheduleClose { tour_id } => {
                    self.schedule_close(tour_id).await;
                }
            }
        }
        follow_up_events
    }

    async fn activate_step(&self, tour_id: TourId, step_index: usize) -> Option<TourEvent> {
        self.stop_step_watch().await;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(step) = self.inner.catalog.step(tour_id, step_index) else {
            warn!(%tour_id, step_index, "step missing from catalog");
            self.inner
                .frames
                .send_replace(OverlayFrame::hidden(generation, self.inner.viewport.size()));
            return None;
        };

        let view = StepView::new(
            tour_id,
            step_index,
            self.inner.catalog.step_count(tour_id),
            step,
            self.inner.enhancements.render_all(step),
        );
        self.inner.frames.send_replace(OverlayFrame::resolving(
            generation,
            view,
            self.inner.settings.estimated_tooltip_size(step),
            self.inner.viewport.size(),
        ));

        let target = self.inner.resolver.resolve(&step.target_selector).await;
        self.publish_target(generation, target);

        if target.is_none() {
            warn!(
                %tour_id,
                step_index,
                selector = %step.target_selector,
                policy = ?self.inner.settings.missing_target,
                "step target not found"
            );
            if self.inner.settings.missing_target == MissingTargetPolicy::Skip {
                return Some(TourEvent::Next);
            }
        }

        let watch = StepWatch::spawn(StepWatchContext {
            generation,
            selector: step.target_selector.clone(),
            resolver: self.inner.resolver.clone(),
            viewport: self.inner.viewport.clone(),
            settings: self.inner.settings.clone(),
            frames: self.inner.frames.clone(),
            commands: self.inner.commands.clone(),
        });
        *self.inner.step_watch.lock().await = Some(watch);
        None
    }

    async fn deactivate_step(&self) {
        self.stop_step_watch().await;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner
            .frames
            .send_replace(OverlayFrame::hidden(generation, self.inner.viewport.size()));
    }

    async fn persist_tour_completed(&self, tour_id: TourId) -> Result<(), TourError> {
        self.inner
            .onboarding
            .send_modify(|state| state.set_tour_completed(tour_id, true));
        self.inner
            .mark_tour_completed
            .execute(&self.inner.user, tour_id)
            .await
            .map_err(|err| {
                warn!(%tour_id, error = %err, "persisting tour completion failed");
                TourError::persistence(format!("completion of tour {tour_id}"), err)
            })
    }

    async fn schedule_close(&self, tour_id: TourId) {
        self.inner.frames.send_modify(|frame| frame.closing = true);

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let delay = self.inner.settings.completion_delay();
        let commands = self.inner.commands.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = commands.send(TourCommand::CloseElapsed { generation });
        });

        debug!(%tour_id, delay_ms = delay.as_millis() as u64, "tour close scheduled");
        if let Some(previous) = self
            .inner
            .close_timer
            .lock()
            .await
            .replace(timer.abort_handle())
        {
            previous.abort();
        }
    }

    async fn cancel_close_timer(&self) {
        if let Some(timer) = self.inner.close_timer.lock().await.take() {
            timer.abort();
            debug!("pending tour close cancelled");
        }
    }

    async fn stop_step_watch(&self) {
        let watch = self.inner.step_watch.lock().await.take();
        if let Some(watch) = watch {
            watch.stop().await;
        }
    }

    fn publish_target(&self, generation: u64, target: Option<Rect>) {
        let viewport = self.inner.viewport.size();
        let settings = &self.inner.settings;
        self.inner.frames.send_if_modified(|frame| {
            if frame.generation != generation {
                return false;
            }
            let before = frame.clone();
            frame.place_target(target, viewport, settings);
            *frame != before
        });
    }

    async fn handle_command(&self, command: TourCommand) {
        let result = match command {
            TourCommand::Key { generation, key } => match key_event(&key) {
                Some(event) => self.dispatch(event, Some(generation)).await,
                None => return,
            },
            TourCommand::CloseElapsed { generation } => {
                self.dispatch(TourEvent::CloseElapsed, Some(generation))
                    .await
            }
        };
        if let Err(err) = result {
            warn!(error = %err, "background tour event failed");
        }
    }
}

fn key_event(key: &KeyInput) -> Option<TourEvent> {
    match key {
        KeyInput::ArrowRight | KeyInput::Enter => Some(TourEvent::Next),
        KeyInput::ArrowLeft => Some(TourEvent::Prev),
        KeyInput::Escape => Some(TourEvent::Skip),
        KeyInput::Other(_) => None,
    }
}

/// Runs step-scoped commands (keys, close timer) through dispatch. Holds only
/// a weak reference so dropping the last controller handle ends it.
async fn pump_commands(
    inner: Weak<ControllerInner>,
    mut commands: mpsc::UnboundedReceiver<TourCommand>,
) {
    while let Some(command) = commands.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        TourController { inner }.handle_command(command).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_event(&KeyInput::ArrowRight), Some(TourEvent::Next));
        assert_eq!(key_event(&KeyInput::Enter), Some(TourEvent::Next));
        assert_eq!(key_event(&KeyInput::ArrowLeft), Some(TourEvent::Prev));
        assert_eq!(key_event(&KeyInput::Escape), Some(TourEvent::Skip));
        assert_eq!(key_event(&KeyInput::Other("a".to_string())), None);
    }
}

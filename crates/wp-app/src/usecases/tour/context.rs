use tokio::sync::{watch, Mutex, MutexGuard};
use wp_core::TourState;

/// Session state plus the lock that serializes dispatch.
///
/// ## Lock Ordering
/// `dispatch_lock` is taken first and held for the whole transition and its
/// side effects. Reads of the state never take it.
pub(crate) struct TourContext {
    state: watch::Sender<TourState>,
    dispatch_lock: Mutex<()>,
}

impl TourContext {
    pub fn new(initial_state: TourState) -> Self {
        let (state, _) = watch::channel(initial_state);
        Self {
            state,
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn get_state(&self) -> TourState {
        *self.state.borrow()
    }

    /// Only call while holding the dispatch lock.
    pub fn set_state(&self, state: TourState) {
        self.state.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<TourState> {
        self.state.subscribe()
    }

    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

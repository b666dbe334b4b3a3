//! Crawl lifecycle state.
//!
//! The original crawler controlled pausing with two `asyncio.Event`s
//! (`pause`, `end`) that callers toggled directly: `pause.set()` /
//! `pause.clear()` from different tasks with no guard against setting both
//! or clearing one that was never set. That's the behavior this module
//! replaces, per the spec's redesign recommendation: a single explicit
//! state enum with a validated transition table, modeled on
//! `riptide-workers::state::StateTransitionGuard`.

use std::collections::HashMap;

use tokio::sync::watch;

use meridian_events::{CrawlEvent, EventPublisher};

/// The crawl's current lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Workers are actively pulling from their queues.
    Running,
    /// Workers have suspended; queues are untouched until resumed.
    Paused,
    /// The crawl has finished; both workers have exited.
    Ended,
}

/// A transition that isn't allowed from the current state.
#[derive(Debug, thiserror::Error)]
#[error("invalid lifecycle transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    from: LifecycleState,
    to: LifecycleState,
}

/// Shared lifecycle state plus a validated transition table. Cloning
/// shares the underlying channel; every clone observes the same state.
#[derive(Clone)]
pub struct LifecycleController {
    tx: watch::Sender<LifecycleState>,
    allowed: &'static HashMapTransitions,
}

/// Thin wrapper so the transition table can be built once and shared via
/// `&'static` rather than cloned into every controller.
struct HashMapTransitions(HashMap<(LifecycleState, LifecycleState), ()>);

fn transition_table() -> &'static HashMapTransitions {
    use LifecycleState::*;
    static TABLE: std::sync::OnceLock<HashMapTransitions> = std::sync::OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::new();
        for pair in [
            (Running, Paused),
            (Paused, Running),
            (Running, Ended),
            (Paused, Ended),
        ] {
            map.insert(pair, ());
        }
        HashMapTransitions(map)
    })
}

/// A read-only view workers use to observe lifecycle changes and block
/// while paused.
pub type LifecycleHandle = watch::Receiver<LifecycleState>;

impl LifecycleController {
    /// Create a controller starting in [`LifecycleState::Running`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LifecycleState::Running);
        Self {
            tx,
            allowed: transition_table(),
        }
    }

    /// Subscribe a worker to lifecycle changes.
    pub fn handle(&self) -> LifecycleHandle {
        self.tx.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        *self.tx.borrow()
    }

    /// Attempt a transition, rejecting any pair not in the allowed table.
    /// Same-state "transitions" are not automatically accepted: `Paused ->
    /// Paused` or `Running -> Running` are just as invalid as any other
    /// pair missing from the table, so e.g. `resume()` correctly errors
    /// when the crawl isn't paused instead of silently no-op'ing.
    pub fn transition(&self, to: LifecycleState) -> Result<(), InvalidTransition> {
        let from = self.state();
        if !self.allowed.0.contains_key(&(from, to)) {
            return Err(InvalidTransition { from, to });
        }
        let _ = self.tx.send(to);
        Ok(())
    }

    /// Request a pause. Errors if the crawl isn't currently running.
    pub fn pause(&self) -> Result<(), InvalidTransition> {
        self.transition(LifecycleState::Paused)
    }

    /// Resume after a pause. Errors if the crawl isn't currently paused.
    pub fn resume(&self) -> Result<(), InvalidTransition> {
        self.transition(LifecycleState::Running)
    }

    /// End the crawl. Valid from either `Running` or `Paused`.
    pub fn end(&self) -> Result<(), InvalidTransition> {
        self.transition(LifecycleState::Ended)
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the [`LifecycleController`] for whichever crawl is currently
/// running (or most recently ran), so the admin API's pause/stop/resume
/// routes can reach it without the crawl pipeline pinning one controller
/// for the life of the process.
///
/// A single long-lived controller would latch to `Ended` the first time a
/// crawl finishes, and the transition table allows no way out of `Ended` —
/// per spec §4.1 ("the crawl may be re-invoked after return") and §6
/// (`/start-crawl` "Create Pause+End signals"), each crawl gets its own
/// fresh signals.
#[derive(Clone, Default)]
pub struct CrawlRegistry {
    current: std::sync::Arc<std::sync::RwLock<Option<LifecycleController>>>,
}

impl CrawlRegistry {
    /// Create an empty registry, as if no crawl has ever been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a fresh crawl, replacing whatever the previous one
    /// left behind. Returns the new controller to hand to the Orchestrator.
    pub fn begin(&self) -> LifecycleController {
        let controller = LifecycleController::new();
        *self.current.write().expect("lifecycle registry lock poisoned") = Some(controller.clone());
        controller
    }

    /// The controller for the currently (or most recently) tracked crawl,
    /// if any crawl has ever been started.
    pub fn current(&self) -> Option<LifecycleController> {
        self.current
            .read()
            .expect("lifecycle registry lock poisoned")
            .clone()
    }
}

/// Block the calling worker while the lifecycle is paused, returning as
/// soon as it moves to `Running` or `Ended`.
pub async fn wait_while_paused(handle: &mut LifecycleHandle) {
    while *handle.borrow() == LifecycleState::Paused {
        if handle.changed().await.is_err() {
            return;
        }
    }
}

/// Same as [`wait_while_paused`], but narrates the suspension on `events`,
/// per spec §4.2 step 2 / §4.3's "emit a paused message ... emit a resumed
/// message". Only emits when the worker actually suspends, so a running
/// loop that never pauses stays silent.
pub async fn wait_while_paused_notifying(handle: &mut LifecycleHandle, events: &EventPublisher) {
    if *handle.borrow() != LifecycleState::Paused {
        return;
    }
    events.publish(CrawlEvent::Paused);
    wait_while_paused(handle).await;
    if *handle.borrow() != LifecycleState::Ended {
        events.publish(CrawlEvent::Resumed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let controller = LifecycleController::new();
        assert_eq!(controller.state(), LifecycleState::Running);
    }

    #[test]
    fn pause_then_resume_round_trips() {
        let controller = LifecycleController::new();
        controller.pause().unwrap();
        assert_eq!(controller.state(), LifecycleState::Paused);
        controller.resume().unwrap();
        assert_eq!(controller.state(), LifecycleState::Running);
    }

    #[test]
    fn cannot_resume_when_not_paused() {
        let controller = LifecycleController::new();
        let err = controller.resume().unwrap_err();
        assert_eq!(err.from, LifecycleState::Running);
        assert_eq!(err.to, LifecycleState::Running);
    }

    #[test]
    fn end_is_valid_from_paused() {
        let controller = LifecycleController::new();
        controller.pause().unwrap();
        controller.end().unwrap();
        assert_eq!(controller.state(), LifecycleState::Ended);
    }

    #[test]
    fn cannot_transition_out_of_ended() {
        let controller = LifecycleController::new();
        controller.end().unwrap();
        assert!(controller.resume().is_err());
        assert!(controller.pause().is_err());
    }

    #[test]
    fn crawl_registry_hands_out_a_fresh_controller_per_crawl() {
        let registry = CrawlRegistry::new();
        assert!(registry.current().is_none());

        let first = registry.begin();
        first.end().unwrap();
        assert_eq!(registry.current().unwrap().state(), LifecycleState::Ended);

        // A second crawl gets its own controller, starting `Running` again
        // rather than inheriting the first crawl's latched `Ended` state.
        let second = registry.begin();
        assert_eq!(second.state(), LifecycleState::Running);
        assert_eq!(registry.current().unwrap().state(), LifecycleState::Running);
    }

    #[tokio::test]
    async fn wait_while_paused_returns_once_resumed() {
        let controller = LifecycleController::new();
        let mut handle = controller.handle();
        controller.pause().unwrap();

        let waiter = tokio::spawn(async move {
            wait_while_paused(&mut handle).await;
        });

        tokio::task::yield_now().await;
        controller.resume().unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("wait_while_paused did not return after resume")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_while_paused_notifying_narrates_pause_and_resume() {
        let controller = LifecycleController::new();
        let mut handle = controller.handle();
        let (events, mut rx) = EventPublisher::new();
        controller.pause().unwrap();

        let waiter = tokio::spawn(async move {
            wait_while_paused_notifying(&mut handle, &events).await;
        });

        assert!(matches!(rx.recv().await.unwrap(), CrawlEvent::Paused));

        tokio::task::yield_now().await;
        controller.resume().unwrap();
        waiter.await.unwrap();

        assert!(matches!(rx.recv().await.unwrap(), CrawlEvent::Resumed));
    }

    #[tokio::test]
    async fn wait_while_paused_notifying_is_silent_when_not_paused() {
        let controller = LifecycleController::new();
        let mut handle = controller.handle();
        let (events, mut rx) = EventPublisher::new();

        wait_while_paused_notifying(&mut handle, &events).await;

        drop(events);
        assert!(rx.recv().await.is_err());
    }
}

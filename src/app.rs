// app.rs - Spin state machine
//
// Idle -> Loading -> { Displaying | ErrorWithFallback }, one immutable snapshot
// per transition.

use crate::scanner::{CycleOutcome, DisasterScanner};
use crate::types::DisasterPosition;

use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// What the view shows once a spin has completed.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    pub current: DisasterPosition,
    pub candidates: Vec<DisasterPosition>,
    pub demo_mode: bool,
    /// Advisory shown alongside the card, e.g. when no live disasters exist
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Displaying(DisplaySnapshot),
    ErrorWithFallback { message: String, snapshot: DisplaySnapshot },
}

#[derive(Debug, Clone)]
pub enum SpinEvent {
    Triggered,
    Completed(CycleOutcome),
}

/// Label state of the spin button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Ready,
    Loading,
}

impl ViewState {
    /// Pure transition function.
    ///
    /// A trigger while loading and a completion while not loading are both
    /// ignored and leave the state untouched.
    pub fn apply(self, event: SpinEvent) -> ViewState {
        match (self, event) {
            (_, SpinEvent::Triggered) => ViewState::Loading,
            (ViewState::Loading, SpinEvent::Completed(outcome)) => ViewState::from_outcome(outcome),
            (state, SpinEvent::Completed(_)) => {
                debug!("Ignoring completion outside of a loading state");
                state
            }
        }
    }

    fn from_outcome(outcome: CycleOutcome) -> ViewState {
        match outcome {
            CycleOutcome::Live { selection, .. } => ViewState::Displaying(DisplaySnapshot {
                current: selection.current,
                candidates: selection.candidates,
                demo_mode: selection.demo_mode,
                notice: None,
            }),
            CycleOutcome::NoDisasters { selection, notice, .. } => ViewState::Displaying(DisplaySnapshot {
                current: selection.current,
                candidates: selection.candidates,
                demo_mode: selection.demo_mode,
                notice: Some(notice),
            }),
            CycleOutcome::Failed { selection, message } => ViewState::ErrorWithFallback {
                message,
                snapshot: DisplaySnapshot {
                    current: selection.current,
                    candidates: selection.candidates,
                    demo_mode: selection.demo_mode,
                    notice: None,
                },
            },
        }
    }

    pub fn snapshot(&self) -> Option<&DisplaySnapshot> {
        match self {
            ViewState::Displaying(snapshot) | ViewState::ErrorWithFallback { snapshot, .. } => Some(snapshot),
            ViewState::Idle | ViewState::Loading => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::ErrorWithFallback { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_demo_mode(&self) -> bool {
        self.snapshot().map(|s| s.demo_mode).unwrap_or(false)
    }

    pub fn button_state(&self) -> ButtonState {
        match self {
            ViewState::Loading => ButtonState::Loading,
            _ => ButtonState::Ready,
        }
    }
}

/// Result of asking the app to spin.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// The spin ran; holds the resulting view state.
    Completed(ViewState),
    /// Another spin was already in flight; this trigger was ignored.
    Busy,
}

pub struct App {
    scanner: DisasterScanner,
    state: RwLock<ViewState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the spin ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl App {
    pub fn new(scanner: DisasterScanner) -> Self {
        Self {
            scanner,
            state: RwLock::new(ViewState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn view(&self) -> ViewState {
        self.state.read().await.clone()
    }

    async fn dispatch(&self, event: SpinEvent) -> ViewState {
        let mut state = self.state.write().await;
        let next = std::mem::take(&mut *state).apply(event);
        *state = next.clone();
        next
    }

    /// Run one find-a-disaster cycle. Overlapping triggers are ignored.
    pub async fn spin(&self) -> SpinOutcome {
        if self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Spin already in progress, ignoring trigger");
            return SpinOutcome::Busy;
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.dispatch(SpinEvent::Triggered).await;
        let outcome = self.scanner.run_cycle().await;
        let view = self.dispatch(SpinEvent::Completed(outcome)).await;
        SpinOutcome::Completed(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::connectors::traits::InfoSource;
    use crate::scanner::{DemoDisasters, FallbackProvider, ScanReport, Selection, FETCH_FAILED_MESSAGE};
    use crate::types::{AllMids, AppError, ClearinghouseState, Result};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    fn selection(demo_mode: bool) -> Selection {
        let candidates = DemoDisasters::at(0).fallback_positions();
        Selection { current: candidates[0].clone(), candidates, demo_mode }
    }

    #[test]
    fn test_transitions() {
        let state = ViewState::Idle;
        assert_eq!(state.button_state(), ButtonState::Ready);

        let state = state.apply(SpinEvent::Triggered);
        assert_eq!(state, ViewState::Loading);
        assert_eq!(state.button_state(), ButtonState::Loading);

        let state = state.apply(SpinEvent::Completed(CycleOutcome::Live {
            selection: selection(false),
            report: ScanReport::default(),
        }));
        let snapshot = state.snapshot().unwrap();
        assert!(!snapshot.demo_mode);
        assert!(snapshot.notice.is_none());
        assert!(state.error_message().is_none());

        // Spin again from a displayed state
        let state = state.apply(SpinEvent::Triggered);
        assert_eq!(state, ViewState::Loading);
    }

    #[test]
    fn test_failure_transition() {
        let state = ViewState::Loading.apply(SpinEvent::Completed(CycleOutcome::Failed {
            selection: selection(true),
            message: FETCH_FAILED_MESSAGE.to_string(),
        }));
        assert_eq!(state.error_message(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.is_demo_mode());
        assert!(state.snapshot().is_some());
    }

    #[test]
    fn test_stale_completion_ignored() {
        let outcome = CycleOutcome::Live { selection: selection(false), report: ScanReport::default() };
        assert_eq!(ViewState::Idle.apply(SpinEvent::Completed(outcome)), ViewState::Idle);
    }

    struct SlowFailingSource;

    #[async_trait]
    impl InfoSource for SlowFailingSource {
        fn get_source_name(&self) -> &str {
            "slow"
        }

        async fn clearinghouse_state(&self, _user: &str) -> Result<ClearinghouseState> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err(AppError::ConnectionError("timed out".into()))
        }

        async fn all_mids(&self) -> Result<AllMids> {
            Ok(AllMids::new())
        }
    }

    fn app() -> App {
        let mut config = Config::default();
        config.discovery.seed_addresses = vec!["0xslow".to_string()];
        let scanner = DisasterScanner::new(Arc::new(SlowFailingSource), Arc::new(DemoDisasters::new()), &config);
        App::new(scanner)
    }

    #[tokio::test]
    async fn test_spin_falls_back_on_failure() {
        let _ = env_logger::try_init();

        let app = app();
        assert_eq!(app.view().await, ViewState::Idle);

        match app.spin().await {
            SpinOutcome::Completed(view) => {
                assert_eq!(view.error_message(), Some(FETCH_FAILED_MESSAGE));
                assert!(view.is_demo_mode());
            }
            SpinOutcome::Busy => panic!("first spin must run"),
        }
        assert!(app.view().await.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_overlapping_spin_is_ignored() {
        let app = app();
        let (first, second) = tokio::join!(app.spin(), app.spin());
        assert!(matches!(first, SpinOutcome::Completed(_)));
        assert_eq!(second, SpinOutcome::Busy);

        // The flag is released once the spin finishes
        assert!(matches!(app.spin().await, SpinOutcome::Completed(_)));
    }
}

//! Integration-level unit tests for the LoadProgressTracker state machine.

use rstest::rstest;
use tabshell::managers::load_progress::LoadProgressTracker;
use tabshell::managers::tab_registry::{TabRegistry, TabRegistryTrait};
use tabshell::surface::headless::{HeadlessFactory, HeadlessSurface};
use tabshell::surface::SurfaceEvent;
use tabshell::types::tab::{LabelHint, LoadState, TabHandle};

/// A tracker with two registered tabs. Handles can only come from a
/// registry, so one is built alongside.
fn tracker_with_tabs() -> (LoadProgressTracker, TabHandle, TabHandle) {
    let mut factory = HeadlessFactory::new();
    let mut registry: TabRegistry<HeadlessSurface> = TabRegistry::new("home");
    let a = registry.create_tab(&mut factory, None, true).unwrap();
    let b = registry.create_tab(&mut factory, None, false).unwrap();
    let mut tracker = LoadProgressTracker::new();
    tracker.register(a);
    tracker.register(b);
    (tracker, a, b)
}

#[test]
fn test_successful_load_sequence() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    assert_eq!(tracker.state_of(tab), LoadState::Idle);

    assert_eq!(
        tracker.on_event(tab, &SurfaceEvent::LoadStarted, ""),
        Some(LabelHint::Loading)
    );
    assert_eq!(tracker.state_of(tab), LoadState::Loading(0));

    tracker.on_event(tab, &SurfaceEvent::LoadProgress(42), "");
    assert_eq!(tracker.state_of(tab), LoadState::Loading(42));

    let hint = tracker.on_event(tab, &SurfaceEvent::LoadFinished(true), "Example");
    assert_eq!(hint, None);
    assert_eq!(tracker.state_of(tab), LoadState::Done);
}

#[test]
fn test_failed_load_ends_in_failed() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
    tracker.on_event(tab, &SurfaceEvent::LoadProgress(30), "");
    assert_eq!(tracker.on_event(tab, &SurfaceEvent::LoadFinished(false), ""), None);
    assert_eq!(tracker.state_of(tab), LoadState::Failed);
}

#[test]
fn test_untitled_page_asks_for_placeholder() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
    assert_eq!(
        tracker.on_event(tab, &SurfaceEvent::LoadFinished(true), ""),
        Some(LabelHint::Untitled)
    );
}

#[rstest]
#[case(LoadState::Idle)]
#[case(LoadState::Done)]
#[case(LoadState::Failed)]
fn test_progress_outside_a_load_is_ignored(#[case] settled: LoadState) {
    let (mut tracker, tab, _) = tracker_with_tabs();
    match settled {
        LoadState::Done => {
            tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
            tracker.on_event(tab, &SurfaceEvent::LoadFinished(true), "t");
        }
        LoadState::Failed => {
            tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
            tracker.on_event(tab, &SurfaceEvent::LoadFinished(false), "");
        }
        _ => {}
    }

    tracker.on_event(tab, &SurfaceEvent::LoadProgress(55), "");
    assert_eq!(tracker.state_of(tab), settled);
}

#[test]
fn test_progress_is_clamped() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
    tracker.on_event(tab, &SurfaceEvent::LoadProgress(250), "");
    assert_eq!(tracker.state_of(tab), LoadState::Loading(100));
}

#[test]
fn test_tabs_are_tracked_independently() {
    let (mut tracker, a, b) = tracker_with_tabs();
    tracker.on_event(a, &SurfaceEvent::LoadStarted, "");
    tracker.on_event(b, &SurfaceEvent::LoadStarted, "");
    tracker.on_event(b, &SurfaceEvent::LoadFinished(false), "");

    assert_eq!(tracker.state_of(a), LoadState::Loading(0));
    assert_eq!(tracker.state_of(b), LoadState::Failed);
}

#[test]
fn test_new_load_restarts_from_any_state() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
    tracker.on_event(tab, &SurfaceEvent::LoadFinished(false), "");

    tracker.on_event(tab, &SurfaceEvent::LoadStarted, "");
    assert_eq!(tracker.state_of(tab), LoadState::Loading(0));

    tracker.on_event(tab, &SurfaceEvent::LoadFinished(true), "t");
    tracker.restart(tab);
    assert_eq!(tracker.state_of(tab), LoadState::Loading(0));
}

#[test]
fn test_forgotten_tab_ignores_events() {
    let (mut tracker, tab, _) = tracker_with_tabs();
    tracker.forget(tab);

    assert!(!tracker.is_tracked(tab));
    assert_eq!(tracker.on_event(tab, &SurfaceEvent::LoadStarted, ""), None);
    assert_eq!(tracker.state_of(tab), LoadState::Idle);
}

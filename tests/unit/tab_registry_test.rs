//! Integration-level unit tests for the TabRegistry public API.
//!
//! Surfaces come from a `HeadlessFactory`, whose shared stats show exactly
//! which engine instances were created, commanded and released.

use tabshell::managers::tab_registry::{CloseOutcome, TabRegistry, TabRegistryTrait};
use tabshell::surface::headless::{HeadlessFactory, HeadlessSurface, SurfaceCommand};
use tabshell::surface::home::HOME_URL;
use tabshell::surface::RenderingSurface;
use tabshell::types::errors::TabError;
use tabshell::types::tab::{LabelHint, TabHandle, LOADING_LABEL, NEW_TAB_LABEL};

fn registry() -> (HeadlessFactory, TabRegistry<HeadlessSurface>) {
    (HeadlessFactory::new(), TabRegistry::new("<h1>home</h1>"))
}

/// Opens `n` tabs, none of them explicitly activated.
fn open_tabs(
    factory: &mut HeadlessFactory,
    registry: &mut TabRegistry<HeadlessSurface>,
    n: usize,
) -> Vec<TabHandle> {
    (0..n)
        .map(|i| {
            registry
                .create_tab(factory, Some(&format!("https://site{}.com", i)), false)
                .unwrap()
        })
        .collect()
}

#[test]
fn test_first_tab_becomes_active() {
    let (mut factory, mut registry) = registry();
    let first = registry.create_tab(&mut factory, None, false).unwrap();
    assert_eq!(registry.active_handle(), Some(first));
    assert_eq!(registry.tab_count(), 1);
}

#[test]
fn test_tab_without_target_shows_home() {
    let (mut factory, mut registry) = registry();
    let tab = registry.create_tab(&mut factory, None, true).unwrap();

    assert_eq!(registry.get(tab).unwrap().url(), HOME_URL);
    let stats = factory.stats();
    let stats = stats.borrow();
    assert_eq!(
        stats.commands_for(tab),
        &[SurfaceCommand::LoadHtml {
            base_url: HOME_URL.to_string()
        }]
    );
}

#[test]
fn test_tab_with_target_navigates() {
    let (mut factory, mut registry) = registry();
    let tab = registry
        .create_tab(&mut factory, Some("https://example.com"), true)
        .unwrap();
    assert_eq!(registry.get(tab).unwrap().url(), "https://example.com");
    assert_eq!(
        registry.get(tab).unwrap().surface().current_url(),
        "https://example.com"
    );
}

#[test]
fn test_background_tab_keeps_active() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 3);
    assert_eq!(registry.active_handle(), Some(tabs[0]));
    assert_eq!(registry.handles(), tabs.as_slice());
}

#[test]
fn test_make_active_switches() {
    let (mut factory, mut registry) = registry();
    open_tabs(&mut factory, &mut registry, 2);
    let fresh = registry.create_tab(&mut factory, None, true).unwrap();
    assert_eq!(registry.active_handle(), Some(fresh));
}

#[test]
fn test_closing_active_tab_activates_left_neighbour() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 3);
    registry.set_active(tabs[1]).unwrap();

    let outcome = registry.close_tab(tabs[1]);

    assert_eq!(
        outcome,
        CloseOutcome::Closed {
            activated: Some(tabs[0])
        }
    );
    assert_eq!(registry.active_handle(), Some(tabs[0]));
    assert_eq!(registry.handles(), &[tabs[0], tabs[2]]);
}

#[test]
fn test_closing_first_active_tab_activates_new_first() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 3);

    let outcome = registry.close_tab(tabs[0]);

    assert_eq!(
        outcome,
        CloseOutcome::Closed {
            activated: Some(tabs[1])
        }
    );
}

#[test]
fn test_closing_background_tab_keeps_active() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 3);

    let outcome = registry.close_tab(tabs[2]);

    assert_eq!(outcome, CloseOutcome::Closed { activated: None });
    assert_eq!(registry.active_handle(), Some(tabs[0]));
}

#[test]
fn test_closing_last_tab_requests_window_close() {
    let (mut factory, mut registry) = registry();
    let only = registry.create_tab(&mut factory, None, true).unwrap();

    assert_eq!(registry.close_tab(only), CloseOutcome::WindowCloseRequested);
    assert_eq!(registry.tab_count(), 1);
    assert!(registry.contains(only));
    assert_eq!(factory.stats().borrow().released, 0);
}

#[test]
fn test_closed_handle_goes_stale() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 2);
    registry.close_tab(tabs[1]);

    assert!(!registry.contains(tabs[1]));
    assert!(registry.get(tabs[1]).is_none());
    assert_eq!(registry.close_tab(tabs[1]), CloseOutcome::Stale);
    assert!(matches!(
        registry.set_active(tabs[1]),
        Err(TabError::NotFound(h)) if h == tabs[1]
    ));
}

#[test]
fn test_reused_slot_does_not_revive_old_handle() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 2);
    registry.close_tab(tabs[1]);

    let reused = registry.create_tab(&mut factory, None, false).unwrap();

    assert_ne!(reused, tabs[1]);
    assert!(registry.contains(reused));
    assert!(!registry.contains(tabs[1]));
}

#[test]
fn test_close_stops_then_releases_surface() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 2);
    registry.close_tab(tabs[1]);

    let stats = factory.stats();
    let stats = stats.borrow();
    assert_eq!(stats.released, 1);
    assert_eq!(stats.live(), 1);
    let cmds = stats.commands_for(tabs[1]);
    assert_eq!(
        &cmds[cmds.len() - 2..],
        &[SurfaceCommand::Stop, SurfaceCommand::Release]
    );
}

#[test]
fn test_failed_surface_creation_leaves_registry_unchanged() {
    let (mut factory, mut registry) = registry();
    let first = registry.create_tab(&mut factory, None, true).unwrap();
    factory.fail_next_creation();

    let result = registry.create_tab(&mut factory, None, true);

    assert!(matches!(result, Err(TabError::Surface(_))));
    assert_eq!(registry.tab_count(), 1);
    assert_eq!(registry.active_handle(), Some(first));

    let next = registry.create_tab(&mut factory, None, true).unwrap();
    assert!(registry.contains(next));
    assert_eq!(registry.tab_count(), 2);
}

#[test]
fn test_labels_follow_hints_and_titles() {
    let (mut factory, mut registry) = registry();
    let tab = registry.create_tab(&mut factory, None, true).unwrap();
    assert_eq!(registry.label(tab).unwrap().text, LOADING_LABEL);

    registry.apply_label_hint(tab, LabelHint::Untitled);
    assert_eq!(registry.label(tab).unwrap().text, NEW_TAB_LABEL);

    registry.apply_label_hint(tab, LabelHint::Loading);
    assert_eq!(registry.label(tab).unwrap().text, LOADING_LABEL);

    registry.set_title_label(tab, "A Very Long Page Title Indeed");
    let label = registry.label(tab).unwrap();
    assert_eq!(label.text, "A Very Long Page Tit...");
    assert_eq!(label.tooltip, "A Very Long Page Title Indeed");

    registry.set_title_label(tab, "");
    assert_eq!(registry.label(tab).unwrap().text, "A Very Long Page Tit...");
}

#[test]
fn test_close_all_releases_everything() {
    let (mut factory, mut registry) = registry();
    open_tabs(&mut factory, &mut registry, 4);

    assert_eq!(registry.close_all(), 4);
    assert_eq!(registry.tab_count(), 0);
    assert_eq!(registry.active_handle(), None);
    assert_eq!(factory.stats().borrow().live(), 0);
}

#[test]
fn test_index_of_follows_display_order() {
    let (mut factory, mut registry) = registry();
    let tabs = open_tabs(&mut factory, &mut registry, 3);
    registry.close_tab(tabs[0]);
    assert_eq!(registry.index_of(tabs[2]), Some(1));
    assert_eq!(registry.index_of(tabs[0]), None);
}

//! Property-based tests for ShellSettings serialization round-trip.
//!
//! These tests verify that ShellSettings can be serialized to JSON and read
//! back, both in memory and through the SettingsEngine's file, without data
//! loss for arbitrary valid inputs. Saving a new window geometry must not
//! disturb anything else in the file.

use proptest::prelude::*;
use std::collections::HashMap;
use tabshell::services::settings_engine::{SettingsEngine, SettingsEngineTrait, SETTINGS_FILE};
use tabshell::types::settings::{
    GeneralSettings, ShellSettings, ViewSettings, WindowGeometry, WindowSettings,
};
use tempfile::TempDir;

fn arb_general_settings() -> impl Strategy<Value = GeneralSettings> {
    ("https://[a-z]{3,12}\\.[a-z]{2,3}/\\?q=", "[a-zA-Z0-9 ]{1,20}").prop_map(
        |(search_url, home_title)| GeneralSettings {
            search_url,
            home_title,
        },
    )
}

fn arb_view_settings() -> impl Strategy<Value = ViewSettings> {
    (1u32..100).prop_map(|hundredths| ViewSettings {
        zoom_step: hundredths as f64 / 100.0,
    })
}

fn arb_geometry() -> impl Strategy<Value = Option<WindowGeometry>> {
    prop::option::of(
        (
            -2000i32..4000,
            -2000i32..4000,
            200u32..4000,
            200u32..3000,
            any::<bool>(),
        )
            .prop_map(|(x, y, width, height, maximized)| WindowGeometry {
                x: x as f64,
                y: y as f64,
                width: width as f64,
                height: height as f64,
                maximized,
            }),
    )
}

fn arb_shortcuts() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[a-z_]{3,12}", "(Ctrl|Alt|Shift)\\+[A-Z0-9]", 0..12)
}

fn arb_settings() -> impl Strategy<Value = ShellSettings> {
    (
        arb_general_settings(),
        arb_view_settings(),
        arb_geometry(),
        arb_shortcuts(),
    )
        .prop_map(|(general, view, geometry, shortcuts)| ShellSettings {
            general,
            view,
            window: WindowSettings { geometry },
            shortcuts,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: ShellSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn settings_file_roundtrip(settings in arb_settings(), geometry in arb_geometry()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        prop_assert_eq!(engine.load().unwrap(), settings.clone());
        engine.set_window_geometry(geometry);
        engine.save().unwrap();

        let mut expected = settings;
        expected.window.geometry = geometry;
        let mut reader = SettingsEngine::new(Some(path));
        prop_assert_eq!(reader.load().unwrap(), expected);
    }
}

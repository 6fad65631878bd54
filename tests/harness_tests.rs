//! Lookup flows through EffectStoreTestHarness
//!
//! Effects are asserted instead of executed; async completions are simulated
//! by queueing the result actions the effect handler would emit.

use tui_dispatch::testing::*;
use weather_lookup::{
    action::Action,
    components::{Component, LookupDisplay, LookupDisplayProps},
    effect::Effect,
    error::{LookupError, FALLBACK_LOOKUP_MESSAGE},
    reducer::reducer,
    state::{AppState, CityQuery, Coordinates, Units, WeatherSnapshot},
};

fn new_york() -> WeatherSnapshot {
    WeatherSnapshot {
        name: "New York".into(),
        temperature: 70.0,
        feels_like: 68.0,
        temp_min: 65.0,
        temp_max: 75.0,
        humidity: 50,
        pressure: 1012.0,
        visibility: Some(10_000.0),
        wind_speed: 10.0,
        wind_deg: None,
        description: "clear sky".into(),
        icon: "01d".into(),
    }
}

#[test]
fn test_lookup_flow_with_harness() {
    let mut harness =
        EffectStoreTestHarness::new(AppState::with_query(Units::Imperial, "New York"), reducer);

    harness.dispatch_collect(Action::LookupSubmit);
    harness.assert_state(|s| s.lookup.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchWeather { seq: 1, query: CityQuery::City(c) } if c == "New York")
    });

    harness.complete_action(Action::LookupDidLoad {
        seq: 1,
        snapshot: new_york(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1);
    assert_eq!(changed, 1);
    harness.assert_state(|s| s.lookup.snapshot().map(|w| w.name.as_str()) == Some("New York"));
}

#[test]
fn test_empty_query_still_issues_request() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { query: CityQuery::City(c), .. } if c.is_empty()),
    );
}

#[test]
fn test_provider_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit);
    harness.complete_action(Action::LookupDidError {
        seq: 1,
        error: LookupError::provider(Some("City not found".into())),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.lookup.is_failure());
    harness.assert_state(|s| {
        s.lookup.error().map(ToString::to_string) == Some("City not found".to_string())
    });
}

#[test]
fn test_transport_failure_clears_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit);
    harness.complete_action(Action::LookupDidError {
        seq: 1,
        error: LookupError::Network("error sending request".into()),
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.lookup.is_loading());
    harness.assert_state(|s| {
        s.lookup
            .error()
            .is_some_and(|e| e.to_string().starts_with(FALLBACK_LOOKUP_MESSAGE))
    });
}

#[test]
fn test_location_denial_leaves_lookup_alone() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationRequest);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::LocateDevice));

    harness.complete_action(Action::LocationDidError("Failed to get your location".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.lookup.is_idle());
    harness.assert_state(|s| s.location_error.as_deref() == Some("Failed to get your location"));
    harness.drain_effects().effects_empty();
}

#[test]
fn test_location_denial_keeps_existing_result() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LookupSubmit);
    harness.complete_action(Action::LookupDidLoad {
        seq: 1,
        snapshot: new_york(),
    });
    harness.complete_action(Action::LocationDidError("Failed to get your location".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.lookup.is_success());
    harness.assert_state(|s| s.location_error.is_some());
}

#[test]
fn test_location_success_fetches_by_coordinates() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let here = Coordinates {
        lat: 40.71,
        lon: -74.01,
    };

    harness.dispatch_collect(Action::LocationDidResolve(here));

    harness.assert_state(|s| s.lookup.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchWeather { query: CityQuery::Coordinates(c), .. } if *c == here),
    );
}

#[test]
fn test_user_submit_supersedes_location_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    // Startup location resolves, then the user searches before it lands
    harness.dispatch_collect(Action::LocationDidResolve(Coordinates { lat: 0.5, lon: 0.5 }));
    harness.dispatch_collect(Action::LookupQueryChange("Tokyo".into()));
    harness.dispatch_collect(Action::LookupSubmit);

    harness.complete_action(Action::LookupDidLoad {
        seq: 2,
        snapshot: WeatherSnapshot {
            name: "Tokyo".into(),
            ..Default::default()
        },
    });
    harness.complete_action(Action::LookupDidLoad {
        seq: 1,
        snapshot: WeatherSnapshot {
            name: "Somewhere".into(),
            ..Default::default()
        },
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "stale completion must not change state");
    harness.assert_state(|s| s.lookup.snapshot().map(|w| w.name.as_str()) == Some("Tokyo"));
}

#[test]
fn test_slow_location_does_not_override_search() {
    let mut harness =
        EffectStoreTestHarness::new(AppState::with_query(Units::Imperial, "Tokyo"), reducer);

    // Startup location request is still in flight when the user searches
    harness.dispatch_collect(Action::LocationRequest);
    harness.dispatch_collect(Action::LookupSubmit);
    harness.drain_effects().effects_count(1);

    harness.complete_action(Action::LookupDidLoad {
        seq: 1,
        snapshot: WeatherSnapshot {
            name: "Tokyo".into(),
            ..Default::default()
        },
    });
    harness.complete_action(Action::LocationDidResolve(Coordinates { lat: 1.0, lon: 2.0 }));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "late location must not start a new fetch");
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.lookup.snapshot().map(|w| w.name.as_str()) == Some("Tokyo"));
}

#[test]
fn test_render_after_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = LookupDisplay::new();

    harness.dispatch_collect(Action::LookupSubmit);
    harness.complete_action(Action::LookupDidLoad {
        seq: 1,
        snapshot: new_york(),
    });
    harness.process_emitted();

    let output = harness.render_plain(80, 30, |frame, area, state| {
        let props = LookupDisplayProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(output.contains("New York"), "Heading should be visible:\n{}", output);
    assert!(output.contains("70°"), "Temperature should be visible:\n{}", output);
}

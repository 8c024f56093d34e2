mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use approx::assert_abs_diff_eq;

use common::{at, surface};
use firemap_core::config::MapConfig;
use firemap_core::consts::{WIND_ARROW_COUNT, WIND_BASE_HEADING_DEG};
use firemap_core::drawing::{LeavePolicy, MapTool};
use firemap_core::layers::ids;
use firemap_core::provider::Fixtures;
use firemap_core::risk_map::RiskMap;
use firemap_core::search::EntityKind;
use firemap_core::viewport::ZoomDirection;

#[test]
fn test_initial_scene_renders_three_default_layers() {
    let map = RiskMap::default();
    let scene = map.scene();

    assert_eq!(
        scene.rendered_layers,
        [ids::RISK_ZONES, ids::FIRE_INCIDENTS, ids::WEATHER_STATIONS]
    );
    let fixtures = Fixtures::sample();
    assert_eq!(scene.zones.len(), fixtures.zones.len());
    assert_eq!(scene.incidents.len(), fixtures.incidents.len());
    assert_eq!(scene.stations.len(), fixtures.stations.len());
    assert!(scene.wind_arrows.is_empty());
    assert!(scene.annotations.is_empty());
    assert!(scene.draft.is_none());

    assert_abs_diff_eq!(scene.zones[0].opacity, 0.7);
    assert_abs_diff_eq!(scene.incidents[0].opacity, 1.0);
    assert_eq!(scene.transform.scale, 1.0);
}

#[test]
fn test_disabled_layer_drops_out_of_scene() {
    let mut map = RiskMap::default();
    map.toggle_layer(ids::FIRE_INCIDENTS);
    map.toggle_layer(ids::WIND_PATTERNS);
    let scene = map.scene();

    assert_eq!(
        scene.rendered_layers,
        [ids::RISK_ZONES, ids::WEATHER_STATIONS, ids::WIND_PATTERNS]
    );
    assert!(scene.incidents.is_empty());
    assert_eq!(scene.wind_arrows.len(), WIND_ARROW_COUNT);
    assert!(scene
        .wind_arrows
        .iter()
        .all(|a| a.heading_deg == WIND_BASE_HEADING_DEG));
    assert_abs_diff_eq!(scene.wind_arrows[0].opacity, 0.6);
    assert_abs_diff_eq!(scene.wind_arrows[4].position.x, 55.0);
    assert_abs_diff_eq!(scene.wind_arrows[4].position.y, 40.0);
}

#[test]
fn test_layer_opacity_scales_marks() {
    let mut map = RiskMap::default();
    map.set_layer_opacity(ids::WEATHER_STATIONS, 25.0);
    assert_abs_diff_eq!(map.scene().stations[0].opacity, 0.25);
}

#[test]
fn test_annotations_show_in_scene() {
    let s = surface();
    let mut map = RiskMap::default();
    map.set_tool(MapTool::DrawCircle);
    map.pointer_down(at(40.0, 40.0), &s);
    map.pointer_move(at(45.0, 40.0), &s);
    assert!(map.scene().draft.is_some());

    map.pointer_up(None, &s);
    let scene = map.scene();
    assert!(scene.draft.is_none());
    assert_eq!(scene.annotations.len(), 1);
    assert_eq!(map.tool(), MapTool::Select);

    map.clear_annotations();
    assert!(map.scene().annotations.is_empty());
}

#[test]
fn test_pan_tool_moves_scene_transform() {
    let s = surface();
    let mut map = RiskMap::default();
    map.set_tool(MapTool::Pan);
    map.pointer_down(at(50.0, 50.0), &s);
    map.pointer_move(at(60.0, 50.0), &s);
    map.pointer_up(None, &s);
    map.zoom(ZoomDirection::In);

    let t = map.scene().transform;
    assert_abs_diff_eq!(t.translate_x, 40.0, epsilon = 1e-3);
    assert_abs_diff_eq!(t.translate_y, 0.0);
    assert_abs_diff_eq!(t.scale, 1.2, epsilon = 1e-6);

    map.reset_view();
    assert!(map.viewport().is_initial());
}

#[test]
fn test_search_choose_selects_and_clears_query() {
    let mut map = RiskMap::default();
    map.set_query("north");
    let hits = map.search_results();
    assert_eq!(hits.len(), 2);

    map.choose(&hits[1]);
    assert_eq!(map.query(), "");
    assert!(map.search_results().is_empty());
    assert_eq!(map.selected_station().unwrap().name, "North Station");
    assert_eq!(map.selected_station().unwrap().wind_direction_deg, 225);

    let scene = map.scene();
    let selected: Vec<_> = scene
        .stations
        .iter()
        .filter(|m| m.selected)
        .map(|m| m.station.id.as_str())
        .collect();
    assert_eq!(selected, ["ws-1"]);
}

#[test]
fn test_marker_click_toggles_selection() {
    let mut map = RiskMap::default();
    map.click_marker(EntityKind::Incident, "fire-3");
    assert_eq!(map.selected_incident().unwrap().acres, 892);

    map.click_marker(EntityKind::Incident, "fire-3");
    assert!(map.selected_incident().is_none());
    assert!(map.selection().is_empty());
}

#[test]
fn test_set_provider_clears_selection() {
    let mut map = RiskMap::default();
    map.click_marker(EntityKind::Zone, "zone-2");
    map.set_query("east");
    map.set_provider(Box::new(Fixtures::default()));

    assert!(map.selection().is_empty());
    assert_eq!(map.query(), "");
    assert!(map.scene().zones.is_empty());
}

#[test]
fn test_leave_policy_comes_from_config() {
    let config = MapConfig {
        leave_policy: LeavePolicy::Discard,
        ..MapConfig::default()
    };
    let map = RiskMap::new(Box::new(Fixtures::sample()), &config);
    assert_eq!(map.drawing().leave_policy(), LeavePolicy::Discard);
}

#[test]
fn test_animation_ticks_and_stops() {
    let config = MapConfig {
        animation_tick_ms: 2,
        ..MapConfig::default()
    };
    let mut map = RiskMap::new(Box::new(Fixtures::sample()), &config);
    map.toggle_layer(ids::WIND_PATTERNS);

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    map.set_animating(true, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    assert!(map.is_animating());

    std::thread::sleep(Duration::from_millis(50));
    map.advance_animation(0.5);
    let headings: Vec<_> = map.scene().wind_arrows.iter().map(|a| a.heading_deg).collect();
    assert_abs_diff_eq!(headings[0], WIND_BASE_HEADING_DEG + 0.5f32.sin() * 10.0, epsilon = 1e-4);

    map.set_animating(false, || {}).unwrap();
    assert!(!map.is_animating());
    let after_stop = ticks.load(Ordering::SeqCst);
    assert!(after_stop > 0);

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    assert!(map
        .scene()
        .wind_arrows
        .iter()
        .all(|a| a.heading_deg == WIND_BASE_HEADING_DEG));
}

#[test]
fn test_dropping_animated_map_stops_ticker() {
    let config = MapConfig {
        animation_tick_ms: 2,
        ..MapConfig::default()
    };
    let mut map = RiskMap::new(Box::new(Fixtures::sample()), &config);

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    map.set_animating(true, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    std::thread::sleep(Duration::from_millis(30));

    drop(map);
    let after_drop = ticks.load(Ordering::SeqCst);
    assert!(after_drop > 0);
    assert_eq!(Arc::strong_count(&ticks), 1);

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
}

mod common;

use std::time::Duration;

use approx::assert_abs_diff_eq;

use common::{date, point, StaticSource};
use firemap_core::config::HeatmapConfig;
use firemap_core::consts::{CIRCLE_OPACITY_DIMMED, CIRCLE_OPACITY_NORMAL};
use firemap_core::error::FiremapError;
use firemap_core::heatmap::renderer::RenderCall;
use firemap_core::heatmap::{
    FitOptions, GeoBounds, HeatmapPanel, MapRenderer, Paint, PanelSettings, RecordingRenderer,
    ReloadOutcome, RenderLayer, Visibility,
};

fn panel() -> HeatmapPanel<RecordingRenderer> {
    HeatmapPanel::new(RecordingRenderer::new(), PanelSettings::default())
}

fn august() -> Vec<firemap_core::heatmap::GeoPoint> {
    vec![
        point(37.0, -120.0, 0.2),
        point(38.5, -119.0, 0.9),
        point(36.2, -121.4, 0.5),
    ]
}

fn january() -> Vec<firemap_core::heatmap::GeoPoint> {
    vec![point(34.1, -118.3, 0.7), point(34.4, -117.9, 0.1)]
}

#[test]
fn test_new_panel_hides_density_layer() {
    let p = panel();
    assert!(!p.heatmap_visible());
    assert_eq!(p.circle_opacity(), CIRCLE_OPACITY_NORMAL);
    assert_eq!(p.intensity(), 1.0);
    assert!(p.source().is_none());
    assert_eq!(
        p.renderer().calls,
        [
            RenderCall::SetVisibility(RenderLayer::Heat, Visibility::Hidden),
            RenderCall::SetPaint(Paint::CircleOpacity(CIRCLE_OPACITY_NORMAL)),
            RenderCall::SetPaint(Paint::HeatmapIntensity(1.0)),
        ]
    );
}

#[test]
fn test_initial_load_installs_source_and_fits_bounds() {
    let source = StaticSource::default().with("2020-08-15", august());
    let mut p = panel();
    let outcome = p.reload_for(&source, p.default_date());

    assert_eq!(outcome, ReloadOutcome::Applied { points: 3 });
    assert_eq!(p.point_count(), 3);
    assert_eq!(p.shown_date(), Some(date("2020-08-15")));

    let (bounds, options) = p.renderer().state.camera.unwrap();
    assert_eq!(
        bounds,
        GeoBounds {
            west: -121.4,
            south: 36.2,
            east: -119.0,
            north: 38.5
        }
    );
    assert_eq!(options.padding, 40.0);
    assert_eq!(options.duration, Duration::from_millis(500));
}

#[test]
fn test_reload_replaces_points_entirely() {
    let source = StaticSource::default()
        .with("2020-08-15", august())
        .with("2021-01-01", january());
    let mut p = panel();
    p.reload_for(&source, date("2020-08-15"));
    let outcome = p.reload_for(&source, date("2021-01-01"));

    assert_eq!(outcome, ReloadOutcome::Applied { points: 2 });
    assert_eq!(p.source().unwrap().points(), january());
    let (bounds, _) = p.renderer().state.camera.unwrap();
    assert_abs_diff_eq!(bounds.west, -118.3);
    assert_abs_diff_eq!(bounds.north, 34.4);
}

#[test]
fn test_stale_response_is_discarded() {
    let mut p = panel();
    let first = p.begin_reload(date("2020-08-15"));
    let second = p.begin_reload(date("2021-01-01"));
    assert!(!p.is_current(&first));
    assert_eq!(p.pending(), Some(second));

    // The later request lands first, then the older one arrives.
    assert_eq!(
        p.complete_reload(second, Ok(january())),
        ReloadOutcome::Applied { points: 2 }
    );
    assert_eq!(p.complete_reload(first, Ok(august())), ReloadOutcome::Stale);

    assert_eq!(p.source().unwrap().points(), january());
    assert_eq!(p.shown_date(), Some(date("2021-01-01")));
    assert_eq!(p.pending(), None);
}

#[test]
fn test_reconfigure_keeps_in_flight_responses_stale() {
    let mut p = panel();
    let before = p.begin_reload(date("2020-08-15"));

    let settings = PanelSettings {
        default_date: date("2021-01-01"),
        ..PanelSettings::default()
    };
    p.reconfigure(RecordingRenderer::new(), settings);
    assert!(!p.is_current(&before));
    assert_eq!(p.pending(), None);
    assert_eq!(p.default_date(), date("2021-01-01"));

    let latest = p.begin_reload(date("2021-01-01"));
    assert!(latest.generation > before.generation);
    assert_eq!(p.complete_reload(before, Ok(august())), ReloadOutcome::Stale);
    assert!(p.source().is_none());
    assert_eq!(p.pending(), Some(latest));

    assert_eq!(
        p.complete_reload(latest, Ok(january())),
        ReloadOutcome::Applied { points: 2 }
    );
    assert_eq!(p.shown_date(), Some(date("2021-01-01")));
}

#[test]
fn test_failed_fetch_keeps_previous_data() {
    let source = StaticSource::default().with("2020-08-15", august());
    let mut p = panel();
    p.reload_for(&source, date("2020-08-15"));

    let outcome = p.reload_for(&source, date("1999-12-31"));
    assert!(matches!(outcome, ReloadOutcome::Failed(_)));
    assert_eq!(p.point_count(), 3);
    assert_eq!(p.shown_date(), Some(date("2020-08-15")));
}

#[test]
fn test_renderer_failure_is_reported_not_raised() {
    let mut p = panel();
    p.renderer_mut().fail_next("style not loaded");
    let ticket = p.begin_reload(date("2020-08-15"));
    let outcome = p.complete_reload(ticket, Ok(august()));

    assert_eq!(
        outcome,
        ReloadOutcome::Failed(FiremapError::Renderer("style not loaded".into()).to_string())
    );
    assert!(p.source().is_none());
}

#[test]
fn test_empty_point_set_replaces_source_without_fit() {
    let mut p = panel();
    let ticket = p.begin_reload(date("2020-08-15"));
    assert_eq!(
        p.complete_reload(ticket, Ok(Vec::new())),
        ReloadOutcome::Applied { points: 0 }
    );
    assert!(p.source().unwrap().is_empty());
    assert!(p.renderer().state.camera.is_none());
}

#[test]
fn test_toggle_heatmap_alternates_circle_opacity() {
    let mut p = panel();
    let mut seen = Vec::new();
    for _ in 0..4 {
        let vis = p.toggle_heatmap();
        seen.push((vis, p.circle_opacity(), p.renderer().state.circle_opacity));
    }
    assert_eq!(
        seen,
        [
            (Visibility::Visible, CIRCLE_OPACITY_DIMMED, CIRCLE_OPACITY_DIMMED),
            (Visibility::Hidden, CIRCLE_OPACITY_NORMAL, CIRCLE_OPACITY_NORMAL),
            (Visibility::Visible, CIRCLE_OPACITY_DIMMED, CIRCLE_OPACITY_DIMMED),
            (Visibility::Hidden, CIRCLE_OPACITY_NORMAL, CIRCLE_OPACITY_NORMAL),
        ]
    );
    assert_eq!(
        p.renderer().layer_visibility(RenderLayer::Heat),
        Visibility::Hidden
    );
}

#[test]
fn test_toggle_failure_reports_unchanged_visibility() {
    let mut p = panel();
    p.renderer_mut().fail_next("style not loaded");
    assert_eq!(p.toggle_heatmap(), Visibility::Hidden);
    assert!(!p.heatmap_visible());
    assert_eq!(p.circle_opacity(), CIRCLE_OPACITY_NORMAL);

    assert_eq!(p.toggle_heatmap(), Visibility::Visible);
    assert_eq!(p.circle_opacity(), CIRCLE_OPACITY_DIMMED);
}

#[test]
fn test_toggle_reverts_layer_when_circle_paint_fails() {
    let mut p = panel();
    p.renderer_mut().fail_next_paint("paint rejected");

    assert_eq!(p.toggle_heatmap(), Visibility::Hidden);
    assert_eq!(
        p.renderer().layer_visibility(RenderLayer::Heat),
        Visibility::Hidden
    );
    assert_eq!(p.circle_opacity(), CIRCLE_OPACITY_NORMAL);
    assert_eq!(p.renderer().state.circle_opacity, CIRCLE_OPACITY_NORMAL);
    assert_eq!(
        p.renderer().calls.last(),
        Some(&RenderCall::SetVisibility(RenderLayer::Heat, Visibility::Hidden))
    );
}

#[test]
fn test_intensity_is_passed_through_unvalidated() {
    let mut p = panel();
    p.set_heatmap_intensity(2.4);
    assert_eq!(p.renderer().state.heatmap_intensity, 2.4);
    p.set_heatmap_intensity(-7.0);
    assert_eq!(p.intensity(), -7.0);
    assert_eq!(
        p.renderer().calls.last(),
        Some(&RenderCall::SetPaint(Paint::HeatmapIntensity(-7.0)))
    );
}

#[test]
fn test_settings_from_config() {
    let config = HeatmapConfig {
        default_date: "2021-07-04".into(),
        initial_intensity: 2.0,
        fit_padding: 10.0,
        fit_duration_ms: 0,
        ..HeatmapConfig::default()
    };
    let settings = PanelSettings::from_config(&config).unwrap();
    assert_eq!(settings.default_date, date("2021-07-04"));
    assert_eq!(
        settings.fit,
        FitOptions {
            padding: 10.0,
            duration: Duration::ZERO
        }
    );

    let p = HeatmapPanel::new(RecordingRenderer::new(), settings);
    assert_eq!(p.renderer().state.heatmap_intensity, 2.0);

    let bad = HeatmapConfig {
        default_date: "15/08/2020".into(),
        ..HeatmapConfig::default()
    };
    assert!(matches!(
        PanelSettings::from_config(&bad),
        Err(FiremapError::InvalidDate(_))
    ));
}

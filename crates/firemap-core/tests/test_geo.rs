mod common;

use approx::assert_abs_diff_eq;

use common::point;
use firemap_core::geometry::Rgba;
use firemap_core::heatmap::density::{density_grid, DensityParams};
use firemap_core::heatmap::geo::risk_tooltip;
use firemap_core::heatmap::ramp::{heatmap_radius, heatmap_weight, DENSITY_RAMP, RISK_RAMP};
use firemap_core::heatmap::{FeatureCollection, GeoBounds, LngLat};

#[test]
fn test_feature_collection_geojson_shape() {
    let fc = FeatureCollection::from_points(&[point(37.3, -119.5, 0.8)]);
    let json: serde_json::Value = serde_json::from_str(&fc.to_json_string().unwrap()).unwrap();

    assert_eq!(json["type"], "FeatureCollection");
    let feature = &json["features"][0];
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["properties"]["risk"], 0.8);
    assert_eq!(feature["geometry"]["type"], "Point");
    assert_eq!(feature["geometry"]["coordinates"][0], -119.5);
    assert_eq!(feature["geometry"]["coordinates"][1], 37.3);
}

#[test]
fn test_bounds_of_points() {
    let fc = FeatureCollection::from_points(&[
        point(37.0, -120.0, 0.1),
        point(39.0, -118.0, 0.1),
        point(35.5, -121.0, 0.1),
    ]);
    let b = fc.bounds().unwrap();
    assert_eq!((b.west, b.south, b.east, b.north), (-121.0, 35.5, -118.0, 39.0));
    assert_eq!(b.center(), LngLat::new(-119.5, 37.25));
    assert!(b.contains(LngLat::new(-119.0, 36.0)));
    assert!(!b.contains(LngLat::new(-117.0, 36.0)));

    assert!(FeatureCollection::default().bounds().is_none());
}

#[test]
fn test_nearest_within_tolerance() {
    let fc = FeatureCollection::from_points(&[point(37.0, -120.0, 0.25), point(37.0, -119.0, 0.75)]);
    let hit = fc.nearest_within(LngLat::new(-119.1, 37.05), 0.2).unwrap();
    assert_eq!(risk_tooltip(hit), "risk: 0.75");
    assert!(fc.nearest_within(LngLat::new(-119.5, 38.0), 0.2).is_none());
}

#[test]
fn test_risk_ramp_stops() {
    assert_eq!(RISK_RAMP.sample(0.0), Rgba::opaque(0x2c, 0x7b, 0xb6));
    assert_eq!(RISK_RAMP.sample(0.5), Rgba::opaque(0xfd, 0xae, 0x61));
    assert_eq!(RISK_RAMP.sample(1.0), Rgba::opaque(0xd7, 0x19, 0x1c));
    assert_eq!(RISK_RAMP.sample(7.0), RISK_RAMP.sample(1.0));
    assert_eq!(RISK_RAMP.sample(-1.0), RISK_RAMP.sample(0.0));
}

#[test]
fn test_density_ramp_is_transparent_at_zero() {
    assert_eq!(DENSITY_RAMP.sample(0.0).a, 0);
    assert_eq!(DENSITY_RAMP.sample(0.8), Rgba::opaque(0xd7, 0x19, 0x1c));
    assert_eq!(DENSITY_RAMP.stops().len(), 4);
}

#[test]
fn test_heatmap_weight_and_radius() {
    assert_eq!(heatmap_weight(0.3), 0.3);
    assert_eq!(heatmap_weight(1.7), 1.0);
    assert_eq!(heatmap_weight(-0.2), 0.0);

    assert_abs_diff_eq!(heatmap_radius(3.0), 15.0);
    assert_abs_diff_eq!(heatmap_radius(5.0), 15.0);
    assert_abs_diff_eq!(heatmap_radius(8.5), 27.5);
    assert_abs_diff_eq!(heatmap_radius(12.0), 40.0);
    assert_abs_diff_eq!(heatmap_radius(18.0), 40.0);
}

#[test]
fn test_density_peaks_at_point() {
    let fc = FeatureCollection::from_points(&[point(0.5, 0.5, 1.0)]);
    let bounds = GeoBounds {
        west: 0.0,
        south: 0.0,
        east: 1.0,
        north: 1.0,
    };
    let params = DensityParams {
        radius: 0.3,
        intensity: 1.0,
    };
    let grid = density_grid(&fc, bounds, 10, 10, params);

    assert_eq!(grid.cells.len(), 100);
    let peak = grid.max();
    assert!(peak > 0.7, "peak {peak}");
    assert_eq!(grid.get(0, 0), 0.0);
    assert!(grid.get(4, 4) > grid.get(4, 2));
    assert!(grid.cells.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_density_scales_with_intensity_and_ignores_zero_risk() {
    let fc = FeatureCollection::from_points(&[point(0.5, 0.5, 0.2), point(0.2, 0.2, 0.0)]);
    let bounds = GeoBounds {
        west: 0.0,
        south: 0.0,
        east: 1.0,
        north: 1.0,
    };
    let low = density_grid(&fc, bounds, 8, 8, DensityParams { radius: 0.3, intensity: 1.0 });
    let high = density_grid(&fc, bounds, 8, 8, DensityParams { radius: 0.3, intensity: 3.0 });
    assert!(high.max() > low.max());

    let only_zero = FeatureCollection::from_points(&[point(0.5, 0.5, 0.0)]);
    let grid = density_grid(&only_zero, bounds, 8, 8, DensityParams { radius: 0.3, intensity: 1.0 });
    assert_eq!(grid.max(), 0.0);
}

#[test]
fn test_large_density_grid_is_row_major() {
    // 80x80 crosses the parallel threshold; the result must still be row-major.
    let fc = FeatureCollection::from_points(&[point(0.9, 0.1, 1.0)]);
    let bounds = GeoBounds {
        west: 0.0,
        south: 0.0,
        east: 1.0,
        north: 1.0,
    };
    let params = DensityParams {
        radius: 0.1,
        intensity: 1.0,
    };
    let grid = density_grid(&fc, bounds, 80, 80, params);
    let (mut best, mut at) = (0.0, (0, 0));
    for row in 0..80 {
        for col in 0..80 {
            if grid.get(row, col) > best {
                best = grid.get(row, col);
                at = (row, col);
            }
        }
    }
    // North-west origin: high latitude is a low row, low longitude a low column.
    assert!(at.0 < 10, "row {}", at.0);
    assert!(at.1 < 10, "col {}", at.1);
}

use crate::geometry::Rgba;

/// Smallest zoom factor the map surface accepts.
pub const MIN_ZOOM: f32 = 0.5;

/// Largest zoom factor the map surface accepts.
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom change applied by one zoom-in / zoom-out step.
pub const ZOOM_STEP: f32 = 0.2;

/// Maximum number of hits returned by an entity search.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Fill colour of committed and in-progress annotations (blue, 50% alpha).
pub const ANNOTATION_FILL: Rgba = Rgba::new(59, 130, 246, 128);

/// Outline colour of an annotation while it is still being drawn.
pub const DRAFT_OUTLINE: Rgba = Rgba::new(59, 130, 246, 255);

/// Circle-layer opacity while the heatmap density layer is hidden.
pub const CIRCLE_OPACITY_NORMAL: f32 = 0.85;

/// Circle-layer opacity while the heatmap density layer is visible.
pub const CIRCLE_OPACITY_DIMMED: f32 = 0.15;

/// Initial heatmap intensity paint value.
pub const DEFAULT_HEATMAP_INTENSITY: f32 = 1.0;

/// Range offered by heatmap intensity controls. The panel itself does not clamp.
pub const HEATMAP_INTENSITY_RANGE: std::ops::RangeInclusive<f32> = 0.5..=3.0;

/// Padding (renderer units) used when fitting the view to the point bounds.
pub const FIT_PADDING: f32 = 40.0;

/// Duration of the fit-bounds transition in milliseconds.
pub const FIT_DURATION_MS: u64 = 500;

/// Date requested when the heatmap panel first loads.
pub const DEFAULT_HEATMAP_DATE: &str = "2020-08-15";

/// Default backend base URL for the `/api/heatmap` endpoint.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Path of the heatmap point endpoint relative to the base URL.
pub const HEATMAP_ENDPOINT: &str = "/api/heatmap";

/// Initial heatmap camera centre as (longitude, latitude): central California.
pub const HEATMAP_INITIAL_CENTER: (f64, f64) = (-119.5, 37.3);

/// Initial heatmap camera zoom, in web-map zoom levels.
pub const HEATMAP_INITIAL_ZOOM: f64 = 5.0;

/// Radius of point-circle markers in the heatmap panel.
pub const POINT_RADIUS: f32 = 4.0;

/// Interval between animation ticks (roughly one display frame).
pub const ANIMATION_TICK_MS: u64 = 16;

/// Number of wind-pattern arrows drawn on the risk map.
pub const WIND_ARROW_COUNT: usize = 8;

/// Base heading (degrees) of the wind-pattern arrows.
pub const WIND_BASE_HEADING_DEG: f32 = 135.0;

/// Maximum swing (degrees) of the wind arrows while the animation runs.
pub const WIND_SWING_DEG: f32 = 10.0;

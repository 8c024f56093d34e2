use egui_plot::{PlotBounds, PlotImage, PlotPoint, PlotPoints, PlotUi, Points};
use firemap_core::consts::{HEATMAP_INITIAL_CENTER, HEATMAP_INITIAL_ZOOM};
use firemap_core::error::Result;
use firemap_core::heatmap::density::{density_grid, DensityParams};
use firemap_core::heatmap::geo::risk_tooltip;
use firemap_core::heatmap::ramp::{heatmap_radius, HEATMAP_MAX_ZOOM, RISK_RAMP};
use firemap_core::heatmap::{
    FeatureCollection, FitOptions, GeoBounds, LngLat, MapRenderer, Paint, RenderLayer,
    RendererState, Visibility,
};
use tracing::debug;

use crate::convert::{density_to_color_image, faded32};

/// Web-map tiles are 256 px wide and cover 360° of longitude at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// Screen pixels per density cell.
const DENSITY_CELL_PX: f32 = 6.0;

/// Risk buckets used to colour the point circles.
const RISK_BUCKETS: usize = 20;

/// Hover distance, in screen pixels, for point tooltips.
const HOVER_TOLERANCE_PX: f64 = 8.0;

/// Smallest span a fit may zoom into, in degrees.
const MIN_FIT_SPAN: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewBox {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl ViewBox {
    fn from_plot(bounds: &PlotBounds) -> Self {
        let [west, south] = bounds.min();
        let [east, north] = bounds.max();
        Self {
            west,
            south,
            east,
            north,
        }
    }

    fn centred(center: LngLat, width: f64, height: f64) -> Self {
        Self {
            west: center.lng - width / 2.0,
            south: center.lat - height / 2.0,
            east: center.lng + width / 2.0,
            north: center.lat + height / 2.0,
        }
    }

    fn width(&self) -> f64 {
        self.east - self.west
    }

    fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            west: mix(self.west, to.west),
            south: mix(self.south, to.south),
            east: mix(self.east, to.east),
            north: mix(self.north, to.north),
        }
    }

    fn to_plot(self) -> PlotBounds {
        PlotBounds::from_min_max([self.west, self.south], [self.east, self.north])
    }

    fn to_geo(self) -> GeoBounds {
        GeoBounds {
            west: self.west,
            south: self.south,
            east: self.east,
            north: self.north,
        }
    }
}

enum CameraRequest {
    Initial,
    Fit(GeoBounds, FitOptions),
}

struct CameraTween {
    from: ViewBox,
    to: ViewBox,
    started: f64,
    duration: f64,
}

#[derive(Clone, Copy, PartialEq)]
struct DensityKey {
    revision: u64,
    view: ViewBox,
    cols: usize,
    rows: usize,
    radius: f64,
    intensity: f32,
}

struct DensityTexture {
    key: DensityKey,
    texture: egui::TextureHandle,
}

/// [`MapRenderer`] that draws the point source into an `egui_plot` plot with
/// longitude on x and latitude on y.
pub struct PlotRenderer {
    state: RendererState,
    point_radius: f32,
    revision: u64,
    request: Option<CameraRequest>,
    tween: Option<CameraTween>,
    density: Option<DensityTexture>,
}

impl PlotRenderer {
    pub fn new(point_radius: f32) -> Self {
        Self {
            state: RendererState::default(),
            point_radius,
            revision: 0,
            request: Some(CameraRequest::Initial),
            tween: None,
            density: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.request.is_some()
    }

    /// Draw one frame into `plot_ui`. `size` is the plot's screen size and
    /// `now` the frame time in seconds. Returns the tooltip for the hovered
    /// point, if any.
    pub fn draw(
        &mut self,
        ctx: &egui::Context,
        plot_ui: &mut PlotUi,
        size: egui::Vec2,
        now: f64,
    ) -> Option<String> {
        self.drive_camera(plot_ui, size, now);

        let view = ViewBox::from_plot(&plot_ui.plot_bounds());
        let deg_per_px = view.width() / f64::from(size.x.max(1.0));
        let zoom = (360.0 / (TILE_SIZE * deg_per_px)).log2();

        if self.state.heat.is_visible() && zoom <= HEATMAP_MAX_ZOOM {
            self.draw_density(ctx, plot_ui, view, size, heatmap_radius(zoom) * deg_per_px);
        }
        if self.state.circles.is_visible() {
            self.draw_circles(plot_ui);
        }

        let pointer = plot_ui.pointer_coordinate()?;
        let source = self.state.source.as_ref()?;
        source
            .nearest_within(
                LngLat::new(pointer.x, pointer.y),
                HOVER_TOLERANCE_PX * deg_per_px,
            )
            .map(risk_tooltip)
    }

    fn drive_camera(&mut self, plot_ui: &mut PlotUi, size: egui::Vec2, now: f64) {
        let current = ViewBox::from_plot(&plot_ui.plot_bounds());
        match self.request.take() {
            Some(CameraRequest::Initial) => {
                let (lng, lat) = HEATMAP_INITIAL_CENTER;
                let width = 360.0 * f64::from(size.x) / (TILE_SIZE * HEATMAP_INITIAL_ZOOM.exp2());
                let height = width * f64::from(size.y) / f64::from(size.x.max(1.0));
                let view = ViewBox::centred(LngLat::new(lng, lat), width, height);
                plot_ui.set_plot_bounds(view.to_plot());
                return;
            }
            Some(CameraRequest::Fit(bounds, options)) => {
                let target = fitted_view(bounds, options.padding, size);
                let duration = options.duration.as_secs_f64();
                if duration <= 0.0 {
                    plot_ui.set_plot_bounds(target.to_plot());
                    return;
                }
                self.tween = Some(CameraTween {
                    from: current,
                    to: target,
                    started: now,
                    duration,
                });
            }
            None => {}
        }

        if let Some(tween) = &self.tween {
            let t = ((now - tween.started) / tween.duration).clamp(0.0, 1.0);
            let eased = 1.0 - (1.0 - t).powi(3);
            plot_ui.set_plot_bounds(tween.from.lerp(tween.to, eased).to_plot());
            if t >= 1.0 {
                self.tween = None;
            }
        }
    }

    fn draw_density(
        &mut self,
        ctx: &egui::Context,
        plot_ui: &mut PlotUi,
        view: ViewBox,
        size: egui::Vec2,
        radius: f64,
    ) {
        let Some(source) = self.state.source.as_ref() else {
            return;
        };
        let key = DensityKey {
            revision: self.revision,
            view,
            cols: (size.x / DENSITY_CELL_PX).ceil().max(1.0) as usize,
            rows: (size.y / DENSITY_CELL_PX).ceil().max(1.0) as usize,
            radius,
            intensity: self.state.heatmap_intensity,
        };

        if self.density.as_ref().map(|d| d.key) != Some(key) {
            let grid = density_grid(
                source,
                view.to_geo(),
                key.cols,
                key.rows,
                DensityParams {
                    radius,
                    intensity: f64::from(key.intensity),
                },
            );
            let image = density_to_color_image(&grid);
            let texture = match self.density.take() {
                Some(mut existing) => {
                    existing.texture.set(image, egui::TextureOptions::LINEAR);
                    existing.texture
                }
                None => ctx.load_texture("heatmap-density", image, egui::TextureOptions::LINEAR),
            };
            self.density = Some(DensityTexture { key, texture });
        }

        if let Some(density) = &self.density {
            let center = PlotPoint::new(
                (view.west + view.east) / 2.0,
                (view.south + view.north) / 2.0,
            );
            let extent = egui::vec2(view.width() as f32, (view.north - view.south) as f32);
            plot_ui.image(PlotImage::new(
                "density",
                density.texture.id(),
                center,
                extent,
            ));
        }
    }

    fn draw_circles(&self, plot_ui: &mut PlotUi) {
        let Some(source) = self.state.source.as_ref() else {
            return;
        };

        let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); RISK_BUCKETS];
        for feature in &source.features {
            let p = feature.position();
            let bucket = (feature.risk().clamp(0.0, 1.0) * (RISK_BUCKETS - 1) as f64).round();
            buckets[bucket as usize].push([p.lng, p.lat]);
        }

        for (i, positions) in buckets.into_iter().enumerate() {
            if positions.is_empty() {
                continue;
            }
            let risk = i as f32 / (RISK_BUCKETS - 1) as f32;
            let color = faded32(RISK_RAMP.sample(risk), self.state.circle_opacity);
            plot_ui.points(
                Points::new("points", PlotPoints::from(positions))
                    .radius(self.point_radius)
                    .filled(true)
                    .color(color),
            );
        }
    }
}

/// View box with `bounds` centred and `padding` screen pixels on every side,
/// keeping equal degrees per pixel on both axes.
fn fitted_view(bounds: GeoBounds, padding: f32, size: egui::Vec2) -> ViewBox {
    let inner_w = f64::from((size.x - 2.0 * padding).max(1.0));
    let inner_h = f64::from((size.y - 2.0 * padding).max(1.0));
    let span_w = bounds.width().max(MIN_FIT_SPAN);
    let span_h = bounds.height().max(MIN_FIT_SPAN);
    let deg_per_px = (span_w / inner_w).max(span_h / inner_h);
    ViewBox::centred(
        bounds.center(),
        deg_per_px * f64::from(size.x),
        deg_per_px * f64::from(size.y),
    )
}

impl MapRenderer for PlotRenderer {
    fn set_source(&mut self, data: FeatureCollection) -> Result<()> {
        debug!(features = data.len(), "plot source replaced");
        self.state.source = Some(data);
        self.revision += 1;
        Ok(())
    }

    fn source(&self) -> Option<&FeatureCollection> {
        self.state.source.as_ref()
    }

    fn set_layer_visibility(&mut self, layer: RenderLayer, visibility: Visibility) -> Result<()> {
        self.state.set_visibility(layer, visibility);
        Ok(())
    }

    fn layer_visibility(&self, layer: RenderLayer) -> Visibility {
        self.state.visibility(layer)
    }

    fn set_paint(&mut self, paint: Paint) -> Result<()> {
        self.state.apply_paint(paint);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, options: FitOptions) -> Result<()> {
        self.state.camera = Some((bounds, options));
        self.request = Some(CameraRequest::Fit(bounds, options));
        Ok(())
    }
}

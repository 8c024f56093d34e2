use std::fmt;
use std::time::Duration;

use crate::consts::{
    CIRCLE_OPACITY_NORMAL, DEFAULT_HEATMAP_INTENSITY, FIT_DURATION_MS, FIT_PADDING,
};
use crate::error::{FiremapError, Result};

use super::geo::{FeatureCollection, GeoBounds};

/// The two layers drawn from the point source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderLayer {
    Circles,
    Heat,
}

impl RenderLayer {
    pub const ALL: &[Self] = &[Self::Circles, Self::Heat];
}

impl fmt::Display for RenderLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circles => write!(f, "pts"),
            Self::Heat => write!(f, "pts-heat"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visible => write!(f, "visible"),
            Self::Hidden => write!(f, "none"),
        }
    }
}

/// Paint updates the panel is allowed to make. Each one belongs to one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    CircleOpacity(f32),
    HeatmapIntensity(f32),
}

impl Paint {
    pub fn layer(&self) -> RenderLayer {
        match self {
            Self::CircleOpacity(_) => RenderLayer::Circles,
            Self::HeatmapIntensity(_) => RenderLayer::Heat,
        }
    }

    pub fn value(&self) -> f32 {
        match self {
            Self::CircleOpacity(v) | Self::HeatmapIntensity(v) => *v,
        }
    }
}

/// Camera fit parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// Screen padding around the box, in pixels.
    pub padding: f32,
    pub duration: Duration,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding: FIT_PADDING,
            duration: Duration::from_millis(FIT_DURATION_MS),
        }
    }
}

/// The narrow set of renderer operations the heatmap panel drives.
///
/// Implementations own one point source feeding both [`RenderLayer`]s.
pub trait MapRenderer {
    /// Install or wholesale replace the point source.
    fn set_source(&mut self, data: FeatureCollection) -> Result<()>;

    fn source(&self) -> Option<&FeatureCollection>;

    fn set_layer_visibility(&mut self, layer: RenderLayer, visibility: Visibility) -> Result<()>;

    fn layer_visibility(&self, layer: RenderLayer) -> Visibility;

    fn set_paint(&mut self, paint: Paint) -> Result<()>;

    /// Animate the camera so `bounds` fills the view.
    fn fit_bounds(&mut self, bounds: GeoBounds, options: FitOptions) -> Result<()>;
}

/// Renderer-independent layer state. Concrete renderers embed it and draw
/// from it.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererState {
    pub source: Option<FeatureCollection>,
    pub circles: Visibility,
    pub heat: Visibility,
    pub circle_opacity: f32,
    pub heatmap_intensity: f32,
    /// Last requested camera fit.
    pub camera: Option<(GeoBounds, FitOptions)>,
}

impl Default for RendererState {
    fn default() -> Self {
        Self {
            source: None,
            circles: Visibility::Visible,
            heat: Visibility::Hidden,
            circle_opacity: CIRCLE_OPACITY_NORMAL,
            heatmap_intensity: DEFAULT_HEATMAP_INTENSITY,
            camera: None,
        }
    }
}

impl RendererState {
    pub fn visibility(&self, layer: RenderLayer) -> Visibility {
        match layer {
            RenderLayer::Circles => self.circles,
            RenderLayer::Heat => self.heat,
        }
    }

    pub fn set_visibility(&mut self, layer: RenderLayer, visibility: Visibility) {
        match layer {
            RenderLayer::Circles => self.circles = visibility,
            RenderLayer::Heat => self.heat = visibility,
        }
    }

    pub fn apply_paint(&mut self, paint: Paint) {
        match paint {
            Paint::CircleOpacity(v) => self.circle_opacity = v,
            Paint::HeatmapIntensity(v) => self.heatmap_intensity = v,
        }
    }
}

/// One facade call, as seen by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    SetSource { features: usize },
    SetVisibility(RenderLayer, Visibility),
    SetPaint(Paint),
    FitBounds(GeoBounds, FitOptions),
}

/// In-memory [`MapRenderer`] that keeps state and a call log. Used by the
/// CLI for headless runs and by tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub state: RendererState,
    pub calls: Vec<RenderCall>,
    fail_next: Option<String>,
    fail_paint: Option<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next facade call fail with `message`.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }

    /// Make the next `set_paint` call fail with `message`.
    pub fn fail_next_paint(&mut self, message: impl Into<String>) {
        self.fail_paint = Some(message.into());
    }

    fn check(&mut self) -> Result<()> {
        match self.fail_next.take() {
            Some(message) => Err(FiremapError::Renderer(message)),
            None => Ok(()),
        }
    }
}

impl MapRenderer for RecordingRenderer {
    fn set_source(&mut self, data: FeatureCollection) -> Result<()> {
        self.check()?;
        self.calls.push(RenderCall::SetSource {
            features: data.len(),
        });
        self.state.source = Some(data);
        Ok(())
    }

    fn source(&self) -> Option<&FeatureCollection> {
        self.state.source.as_ref()
    }

    fn set_layer_visibility(&mut self, layer: RenderLayer, visibility: Visibility) -> Result<()> {
        self.check()?;
        self.calls.push(RenderCall::SetVisibility(layer, visibility));
        self.state.set_visibility(layer, visibility);
        Ok(())
    }

    fn layer_visibility(&self, layer: RenderLayer) -> Visibility {
        self.state.visibility(layer)
    }

    fn set_paint(&mut self, paint: Paint) -> Result<()> {
        self.check()?;
        if let Some(message) = self.fail_paint.take() {
            return Err(FiremapError::Renderer(message));
        }
        self.calls.push(RenderCall::SetPaint(paint));
        self.state.apply_paint(paint);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, options: FitOptions) -> Result<()> {
        self.check()?;
        self.calls.push(RenderCall::FitBounds(bounds, options));
        self.state.camera = Some((bounds, options));
        Ok(())
    }
}

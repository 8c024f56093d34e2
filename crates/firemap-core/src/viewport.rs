use std::fmt;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Direction of a single zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl fmt::Display for ZoomDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "Zoom In"),
            Self::Out => write!(f, "Zoom Out"),
        }
    }
}

/// Pan offset (pixels) and zoom factor of the map surface.
///
/// Zoom is kept within [`MIN_ZOOM`, `MAX_ZOOM`] on every update; pan is
/// unconstrained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pan_x: f32,
    pan_y: f32,
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Visual transform derived from a [`Viewport`]: translate, then scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pan_x(&self) -> f32 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f32 {
        self.pan_y
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom
    }

    /// Zoom as a rounded percentage, e.g. `120` for a factor of 1.2.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Step zoom by ±[`ZOOM_STEP`], clamped to the allowed range.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let delta = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => -ZOOM_STEP,
        };
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn transform(&self) -> SurfaceTransform {
        SurfaceTransform {
            translate_x: self.pan_x,
            translate_y: self.pan_y,
            scale: self.zoom,
        }
    }

    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pan ({:.0}, {:.0}) zoom {}%",
            self.pan_x,
            self.pan_y,
            self.zoom_percent()
        )
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in screen pixels, as reported by pointer events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f32,
    pub y: f32,
}

impl ScreenPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A position on the map surface in percent (0–100) of its rendered box.
///
/// Values outside 0–100 are possible when the pointer is outside the surface
/// and are kept as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in percent units.
    pub fn distance_to(&self, other: SurfacePoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle in surface-percent coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalised rectangle spanned by two opposite corners.
    pub fn from_corners(a: SurfacePoint, b: SurfacePoint) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, p: SurfacePoint) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// The rendered box of the map surface in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBox {
    pub origin: ScreenPos,
    pub width: f32,
    pub height: f32,
}

impl SurfaceBox {
    pub const fn new(origin: ScreenPos, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Convert a pixel position to surface percent: `(pixel - origin) / size * 100`.
    ///
    /// A degenerate box (zero width or height) maps every position to 0 on
    /// that axis rather than producing NaN.
    pub fn to_surface_percent(&self, pos: ScreenPos) -> SurfacePoint {
        SurfacePoint {
            x: percent_of(pos.x - self.origin.x, self.width),
            y: percent_of(pos.y - self.origin.y, self.height),
        }
    }

    /// Inverse of [`to_surface_percent`](Self::to_surface_percent).
    pub fn to_screen(&self, p: SurfacePoint) -> ScreenPos {
        ScreenPos {
            x: self.origin.x + p.x / 100.0 * self.width,
            y: self.origin.y + p.y / 100.0 * self.height,
        }
    }
}

fn percent_of(offset: f32, extent: f32) -> f32 {
    if extent == 0.0 {
        0.0
    } else {
        offset / extent * 100.0
    }
}

/// 8-bit RGBA colour, independent of any rendering toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same colour with alpha replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Scale alpha by `factor` (clamped to 0–1).
    pub fn faded(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(a)
    }

    /// Linear interpolation between two colours, `t` clamped to 0–1.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

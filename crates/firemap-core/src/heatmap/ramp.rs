use crate::geometry::Rgba;

/// Piecewise-linear colour ramp over ascending stops. Inputs outside the
/// stop range take the colour of the nearest end stop.
#[derive(Clone, Copy, Debug)]
pub struct ColorRamp {
    stops: &'static [(f32, Rgba)],
}

impl ColorRamp {
    pub const fn new(stops: &'static [(f32, Rgba)]) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &'static [(f32, Rgba)] {
        self.stops
    }

    pub fn sample(&self, t: f32) -> Rgba {
        let Some(&(first_t, first_c)) = self.stops.first() else {
            return TRANSPARENT;
        };
        if t <= first_t {
            return first_c;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                let local = if span > 0.0 { (t - t0) / span } else { 1.0 };
                return c0.lerp(c1, local);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

const BLUE: Rgba = Rgba::opaque(0x2c, 0x7b, 0xb6);
const ORANGE: Rgba = Rgba::opaque(0xfd, 0xae, 0x61);
const RED: Rgba = Rgba::opaque(0xd7, 0x19, 0x1c);
const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

/// Point-circle colour by risk (0, 0.5, 1).
pub const RISK_RAMP: ColorRamp = ColorRamp::new(&[(0.0, BLUE), (0.5, ORANGE), (1.0, RED)]);

/// Density-layer colour by normalised density; zero density is transparent.
pub const DENSITY_RAMP: ColorRamp = ColorRamp::new(&[
    (0.0, TRANSPARENT),
    (0.2, BLUE),
    (0.5, ORANGE),
    (0.8, RED),
]);

/// Zoom above which the density layer is not drawn.
pub const HEATMAP_MAX_ZOOM: f64 = 12.0;

/// Heatmap contribution of one point: its risk, clamped to 0–1.
pub fn heatmap_weight(risk: f64) -> f64 {
    risk.clamp(0.0, 1.0)
}

/// Kernel radius in pixels by map zoom: 15 at zoom 5 rising to 40 at zoom 12.
pub fn heatmap_radius(zoom: f64) -> f64 {
    const Z0: f64 = 5.0;
    const Z1: f64 = 12.0;
    const R0: f64 = 15.0;
    const R1: f64 = 40.0;
    let t = ((zoom - Z0) / (Z1 - Z0)).clamp(0.0, 1.0);
    R0 + (R1 - R0) * t
}

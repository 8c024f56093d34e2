use rayon::prelude::*;

use super::geo::{FeatureCollection, GeoBounds, LngLat};
use super::ramp::heatmap_weight;

/// Minimum cell count (rows*cols) to evaluate rows in parallel.
const PARALLEL_CELL_THRESHOLD: usize = 4_096;

/// Rasterised heatmap density over a bounding box.
///
/// Cell `(row, col)` covers the box slice starting at the north-west corner;
/// row 0 is the northernmost row. Values are clamped to 0–1.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    pub bounds: GeoBounds,
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<f32>,
}

impl DensityGrid {
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.cols + col]
    }

    pub fn cell_width(&self) -> f64 {
        self.bounds.width() / self.cols as f64
    }

    pub fn cell_height(&self) -> f64 {
        self.bounds.height() / self.rows as f64
    }

    /// Centre of a cell in lon/lat.
    pub fn cell_center(&self, row: usize, col: usize) -> LngLat {
        LngLat::new(
            self.bounds.west + (col as f64 + 0.5) * self.cell_width(),
            self.bounds.north - (row as f64 + 0.5) * self.cell_height(),
        )
    }

    pub fn max(&self) -> f32 {
        self.cells.iter().copied().fold(0.0, f32::max)
    }
}

/// Kernel density parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityParams {
    /// Kernel radius in degrees; contributions vanish beyond it.
    pub radius: f64,
    /// Multiplier applied to the summed density before clamping.
    pub intensity: f64,
}

/// Evaluate a truncated Gaussian kernel density of the features' risk weights
/// on a `cols`x`rows` grid spanning `bounds`.
pub fn density_grid(
    features: &FeatureCollection,
    bounds: GeoBounds,
    cols: usize,
    rows: usize,
    params: DensityParams,
) -> DensityGrid {
    let mut grid = DensityGrid {
        bounds,
        cols,
        rows,
        cells: vec![0.0; cols * rows],
    };
    if cols == 0 || rows == 0 || params.radius <= 0.0 {
        return grid;
    }

    let samples: Vec<(LngLat, f64)> = features
        .features
        .iter()
        .map(|f| (f.position(), heatmap_weight(f.risk())))
        .filter(|(_, w)| *w > 0.0)
        .collect();

    let sigma = params.radius / 3.0;
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);
    let radius_sq = params.radius * params.radius;
    let cell_w = bounds.width() / cols as f64;
    let cell_h = bounds.height() / rows as f64;

    let fill_row = |row: usize, out: &mut [f32]| {
        let lat = bounds.north - (row as f64 + 0.5) * cell_h;
        for (col, cell) in out.iter_mut().enumerate() {
            let lng = bounds.west + (col as f64 + 0.5) * cell_w;
            let mut sum = 0.0;
            for (p, w) in &samples {
                let (dx, dy) = (p.lng - lng, p.lat - lat);
                let d_sq = dx * dx + dy * dy;
                if d_sq <= radius_sq {
                    sum += w * (-d_sq * inv_two_sigma_sq).exp();
                }
            }
            *cell = (sum * params.intensity).clamp(0.0, 1.0) as f32;
        }
    };

    if cols * rows >= PARALLEL_CELL_THRESHOLD {
        grid.cells
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| fill_row(row, out));
    } else {
        grid.cells
            .chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| fill_row(row, out));
    }

    grid
}

use firemap_core::geometry::{Rgba, ScreenPos, SurfaceBox};
use firemap_core::heatmap::density::DensityGrid;
use firemap_core::heatmap::ramp::DENSITY_RAMP;

pub fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// `c` with its alpha scaled by `opacity` (0–1).
pub fn faded32(c: Rgba, opacity: f32) -> egui::Color32 {
    color32(c.faded(opacity))
}

pub fn to_screen_pos(p: egui::Pos2) -> ScreenPos {
    ScreenPos::new(p.x, p.y)
}

pub fn to_pos2(p: ScreenPos) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

pub fn surface_rect(surface: &SurfaceBox) -> egui::Rect {
    egui::Rect::from_min_size(
        to_pos2(surface.origin),
        egui::vec2(surface.width, surface.height),
    )
}

/// Colour a density grid through the density ramp. Row 0 is the northern
/// edge, which is also the top row of the image.
pub fn density_to_color_image(grid: &DensityGrid) -> egui::ColorImage {
    let mut pixels = Vec::with_capacity(grid.cols * grid.rows);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            pixels.push(color32(DENSITY_RAMP.sample(grid.get(row, col))));
        }
    }

    egui::ColorImage {
        size: [grid.cols, grid.rows],
        pixels,
        source_size: Default::default(),
    }
}

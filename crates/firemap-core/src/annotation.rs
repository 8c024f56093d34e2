use std::fmt;

use serde::Serialize;

use crate::geometry::{Rgba, SurfacePoint, SurfaceRect};

/// Geometric kind of a user-drawn annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "Circle"),
            Self::Rectangle => write!(f, "Rectangle"),
        }
    }
}

/// Size of a shape relative to its anchor, in surface-percent units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeExtent {
    /// Circle radius.
    Radius(f32),
    /// Rectangle corner opposite the anchor.
    Corner(SurfacePoint),
}

impl ShapeExtent {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Radius(_) => ShapeKind::Circle,
            Self::Corner(_) => ShapeKind::Rectangle,
        }
    }
}

/// Bounding box of a shape anchored at `anchor`.
fn extent_bounds(anchor: SurfacePoint, extent: ShapeExtent) -> SurfaceRect {
    match extent {
        ShapeExtent::Radius(r) => SurfaceRect::new(anchor.x - r, anchor.y - r, r * 2.0, r * 2.0),
        ShapeExtent::Corner(corner) => SurfaceRect::from_corners(anchor, corner),
    }
}

/// A committed annotation. Immutable: it can only be removed, never edited.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    id: String,
    anchor: SurfacePoint,
    extent: ShapeExtent,
    color: Rgba,
}

impl Annotation {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.extent.kind()
    }

    pub fn anchor(&self) -> SurfacePoint {
        self.anchor
    }

    pub fn extent(&self) -> ShapeExtent {
        self.extent
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Radius for circles, `None` for rectangles.
    pub fn radius(&self) -> Option<f32> {
        match self.extent {
            ShapeExtent::Radius(r) => Some(r),
            ShapeExtent::Corner(_) => None,
        }
    }

    pub fn bounding_box(&self) -> SurfaceRect {
        extent_bounds(self.anchor, self.extent)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extent {
            ShapeExtent::Radius(r) => write!(
                f,
                "Circle at ({:.1}%, {:.1}%) r={:.1}%",
                self.anchor.x, self.anchor.y, r
            ),
            ShapeExtent::Corner(_) => {
                let b = self.bounding_box();
                write!(
                    f,
                    "Rectangle at ({:.1}%, {:.1}%) {:.1}%x{:.1}%",
                    b.left, b.top, b.width, b.height
                )
            }
        }
    }
}

/// An annotation still being drawn. Its extent is empty until the first
/// pointer move.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    id: String,
    kind: ShapeKind,
    anchor: SurfacePoint,
    extent: Option<ShapeExtent>,
    color: Rgba,
}

impl Draft {
    pub(crate) fn new(id: String, kind: ShapeKind, anchor: SurfacePoint, color: Rgba) -> Self {
        Self {
            id,
            kind,
            anchor,
            extent: None,
            color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> SurfacePoint {
        self.anchor
    }

    pub fn extent(&self) -> Option<ShapeExtent> {
        self.extent
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Recompute the extent from the current pointer position.
    pub(crate) fn update(&mut self, pointer: SurfacePoint) {
        self.extent = Some(match self.kind {
            ShapeKind::Circle => ShapeExtent::Radius(self.anchor.distance_to(pointer)),
            ShapeKind::Rectangle => ShapeExtent::Corner(pointer),
        });
    }

    /// Bounding box of the shape drawn so far, `None` before the first move.
    pub fn bounding_box(&self) -> Option<SurfaceRect> {
        self.extent.map(|e| extent_bounds(self.anchor, e))
    }

    /// Freeze the draft. An untouched draft becomes a zero-extent shape.
    pub(crate) fn commit(self) -> Annotation {
        let extent = self.extent.unwrap_or(match self.kind {
            ShapeKind::Circle => ShapeExtent::Radius(0.0),
            ShapeKind::Rectangle => ShapeExtent::Corner(self.anchor),
        });
        Annotation {
            id: self.id,
            anchor: self.anchor,
            extent,
            color: self.color,
        }
    }
}

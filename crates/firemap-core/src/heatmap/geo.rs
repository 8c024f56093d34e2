use serde::{Deserialize, Serialize};

/// A risk sample from the heatmap endpoint. `risk` is nominally 0–1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub risk: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Longitude/latitude bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    /// Smallest box containing every position; `None` if there are none.
    pub fn from_positions(positions: impl IntoIterator<Item = LngLat>) -> Option<Self> {
        positions.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    west: p.lng,
                    south: p.lat,
                    east: p.lng,
                    north: p.lat,
                },
                Some(b) => Self {
                    west: b.west.min(p.lng),
                    south: b.south.min(p.lat),
                    east: b.east.max(p.lng),
                    north: b.north.max(p.lat),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn center(&self) -> LngLat {
        LngLat::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    pub fn contains(&self, p: LngLat) -> bool {
        p.lng >= self.west && p.lng <= self.east && p.lat >= self.south && p.lat <= self.north
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointProperties {
    pub risk: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    /// `[longitude, latitude]`, GeoJSON order.
    pub coordinates: [f64; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct PointFeature {
    pub properties: PointProperties,
    pub geometry: PointGeometry,
}

impl PointFeature {
    pub fn position(&self) -> LngLat {
        LngLat::new(self.geometry.coordinates[0], self.geometry.coordinates[1])
    }

    pub fn risk(&self) -> f64 {
        self.properties.risk
    }
}

impl From<&GeoPoint> for PointFeature {
    fn from(p: &GeoPoint) -> Self {
        Self {
            properties: PointProperties { risk: p.risk },
            geometry: PointGeometry {
                coordinates: [p.lon, p.lat],
            },
        }
    }
}

/// GeoJSON point feature collection backing the heatmap panel's source.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<PointFeature>,
}

impl FeatureCollection {
    pub fn from_points(points: &[GeoPoint]) -> Self {
        Self {
            features: points.iter().map(PointFeature::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_positions(self.features.iter().map(PointFeature::position))
    }

    /// Convert back to plain points.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.features
            .iter()
            .map(|f| GeoPoint {
                lat: f.geometry.coordinates[1],
                lon: f.geometry.coordinates[0],
                risk: f.properties.risk,
            })
            .collect()
    }

    /// Closest feature to `at` within `tolerance` degrees, for hover tooltips.
    pub fn nearest_within(&self, at: LngLat, tolerance: f64) -> Option<&PointFeature> {
        let tol_sq = tolerance * tolerance;
        self.features
            .iter()
            .map(|f| {
                let p = f.position();
                let (dx, dy) = (p.lng - at.lng, p.lat - at.lat);
                (f, dx * dx + dy * dy)
            })
            .filter(|(_, d)| *d <= tol_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }

    pub fn to_json_string(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Tooltip text for a hovered feature, e.g. `risk: 0.42`.
pub fn risk_tooltip(feature: &PointFeature) -> String {
    format!("risk: {:.2}", feature.risk())
}

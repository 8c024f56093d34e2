use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rgba, SurfacePoint, SurfaceRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    pub const ALL: &[Self] = &[Self::Low, Self::Moderate, Self::High, Self::Extreme];

    /// Badge label, e.g. "Extreme Risk".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
            Self::Extreme => "Extreme Risk",
        }
    }

    /// Fill colour of a zone at this level (70% alpha).
    pub fn fill(&self) -> Rgba {
        self.border().with_alpha(179)
    }

    pub fn border(&self) -> Rgba {
        match self {
            Self::Low => Rgba::opaque(34, 197, 94),
            Self::Moderate => Rgba::opaque(234, 179, 8),
            Self::High => Rgba::opaque(249, 115, 22),
            Self::Extreme => Rgba::opaque(220, 38, 38),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
            Self::Extreme => write!(f, "extreme"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Contained,
    Controlled,
    Out,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Contained => write!(f, "contained"),
            Self::Controlled => write!(f, "controlled"),
            Self::Out => write!(f, "out"),
        }
    }
}

/// A risk zone; `bbox` is in surface percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub bbox: SurfaceRect,
    /// Degrees Fahrenheit.
    pub temperature: f32,
    /// Relative humidity, percent.
    pub humidity: f32,
    /// Miles per hour.
    pub wind_speed: f32,
    pub last_updated: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FireIncident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    pub acres: u32,
    pub containment_pct: u8,
    pub point: SurfacePoint,
    pub start_date: String,
    pub threat_level: RiskLevel,
}

impl FireIncident {
    /// Marker colour: active incidents are red when the threat is extreme and
    /// orange otherwise; anything not active is grey.
    pub fn marker_color(&self) -> Rgba {
        match (self.status, self.threat_level) {
            (IncidentStatus::Active, RiskLevel::Extreme) => Rgba::opaque(220, 38, 38),
            (IncidentStatus::Active, _) => Rgba::opaque(249, 115, 22),
            _ => Rgba::opaque(107, 114, 128),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    pub point: SurfacePoint,
    pub temperature: f32,
    pub humidity: f32,
    pub wind_speed: f32,
    pub wind_direction_deg: u16,
    pub last_reading: String,
}

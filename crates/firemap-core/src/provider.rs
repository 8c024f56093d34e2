use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{FireIncident, IncidentStatus, RiskLevel, RiskZone, WeatherStation};
use crate::error::Result;
use crate::geometry::{SurfacePoint, SurfaceRect};

/// Source of the zone, incident and station collections shown on the map.
///
/// Collections are returned in their canonical order; search and selection
/// rely on that order being stable between calls.
pub trait EntityProvider {
    fn list_zones(&self) -> &[RiskZone];
    fn list_incidents(&self) -> &[FireIncident];
    fn list_stations(&self) -> &[WeatherStation];

    fn find_zone(&self, id: &str) -> Option<&RiskZone> {
        self.list_zones().iter().find(|z| z.id == id)
    }

    fn find_incident(&self, id: &str) -> Option<&FireIncident> {
        self.list_incidents().iter().find(|i| i.id == id)
    }

    fn find_station(&self, id: &str) -> Option<&WeatherStation> {
        self.list_stations().iter().find(|s| s.id == id)
    }
}

/// Static entity collections, either the built-in sample set or a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub zones: Vec<RiskZone>,
    #[serde(default)]
    pub incidents: Vec<FireIncident>,
    #[serde(default)]
    pub stations: Vec<WeatherStation>,
}

impl EntityProvider for Fixtures {
    fn list_zones(&self) -> &[RiskZone] {
        &self.zones
    }

    fn list_incidents(&self) -> &[FireIncident] {
        &self.incidents
    }

    fn list_stations(&self) -> &[WeatherStation] {
        &self.stations
    }
}

impl Fixtures {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fixtures = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            zones = fixtures.zones.len(),
            incidents = fixtures.incidents.len(),
            stations = fixtures.stations.len(),
            "loaded fixtures"
        );
        Ok(fixtures)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.zones.len() + self.incidents.len() + self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sample dataset the dashboard ships with.
    pub fn sample() -> Self {
        Self {
            zones: vec![
                zone("zone-1", "North Valley", RiskLevel::Extreme, (15.0, 10.0, 30.0, 25.0), (98.0, 12.0, 35.0), "5 minutes ago"),
                zone("zone-2", "East Hills", RiskLevel::High, (60.0, 20.0, 25.0, 30.0), (89.0, 18.0, 28.0), "8 minutes ago"),
                zone("zone-3", "Central Plains", RiskLevel::Moderate, (35.0, 45.0, 35.0, 20.0), (82.0, 35.0, 15.0), "3 minutes ago"),
                zone("zone-4", "South Basin", RiskLevel::Low, (20.0, 70.0, 40.0, 20.0), (76.0, 45.0, 8.0), "12 minutes ago"),
            ],
            incidents: vec![
                FireIncident {
                    id: "fire-1".into(),
                    name: "Oak Ridge Fire".into(),
                    status: IncidentStatus::Active,
                    acres: 2845,
                    containment_pct: 25,
                    point: SurfacePoint::new(25.0, 18.0),
                    start_date: "2025-09-15".into(),
                    threat_level: RiskLevel::Extreme,
                },
                FireIncident {
                    id: "fire-2".into(),
                    name: "Pine Valley Fire".into(),
                    status: IncidentStatus::Contained,
                    acres: 156,
                    containment_pct: 95,
                    point: SurfacePoint::new(70.0, 35.0),
                    start_date: "2025-09-14".into(),
                    threat_level: RiskLevel::Low,
                },
                FireIncident {
                    id: "fire-3".into(),
                    name: "Mesa Point Fire".into(),
                    status: IncidentStatus::Controlled,
                    acres: 892,
                    containment_pct: 80,
                    point: SurfacePoint::new(45.0, 55.0),
                    start_date: "2025-09-13".into(),
                    threat_level: RiskLevel::Moderate,
                },
            ],
            stations: vec![
                station("ws-1", "North Station", (30.0, 15.0), (98.0, 12.0, 35.0), 225, "2 minutes ago"),
                station("ws-2", "East Station", (75.0, 30.0), (89.0, 18.0, 28.0), 180, "4 minutes ago"),
                station("ws-3", "Central Station", (50.0, 50.0), (82.0, 35.0, 15.0), 135, "1 minute ago"),
            ],
        }
    }
}

fn zone(
    id: &str,
    name: &str,
    risk_level: RiskLevel,
    (x, y, w, h): (f32, f32, f32, f32),
    (temperature, humidity, wind_speed): (f32, f32, f32),
    last_updated: &str,
) -> RiskZone {
    RiskZone {
        id: id.into(),
        name: name.into(),
        risk_level,
        bbox: SurfaceRect::new(x, y, w, h),
        temperature,
        humidity,
        wind_speed,
        last_updated: last_updated.into(),
    }
}

fn station(
    id: &str,
    name: &str,
    (x, y): (f32, f32),
    (temperature, humidity, wind_speed): (f32, f32, f32),
    wind_direction_deg: u16,
    last_reading: &str,
) -> WeatherStation {
    WeatherStation {
        id: id.into(),
        name: name.into(),
        point: SurfacePoint::new(x, y),
        temperature,
        humidity,
        wind_speed,
        wind_direction_deg,
        last_reading: last_reading.into(),
    }
}

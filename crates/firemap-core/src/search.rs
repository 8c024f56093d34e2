use std::fmt;

use crate::consts::MAX_SEARCH_RESULTS;
use crate::provider::EntityProvider;

/// Which collection a search hit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Zone,
    Incident,
    Station,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone => write!(f, "zone"),
            Self::Incident => write!(f, "incident"),
            Self::Station => write!(f, "station"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: String,
    pub name: String,
}

/// Case-insensitive substring search over entity names.
///
/// Zones come first, then incidents, then stations, each in provider order,
/// truncated to [`MAX_SEARCH_RESULTS`]. An empty query returns nothing.
pub fn search(provider: &dyn EntityProvider, query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let matches = |name: &str| name.to_lowercase().contains(&needle);

    let zones = provider
        .list_zones()
        .iter()
        .filter(|z| matches(&z.name))
        .map(|z| hit(EntityKind::Zone, &z.id, &z.name));
    let incidents = provider
        .list_incidents()
        .iter()
        .filter(|i| matches(&i.name))
        .map(|i| hit(EntityKind::Incident, &i.id, &i.name));
    let stations = provider
        .list_stations()
        .iter()
        .filter(|s| matches(&s.name))
        .map(|s| hit(EntityKind::Station, &s.id, &s.name));

    zones
        .chain(incidents)
        .chain(stations)
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

fn hit(kind: EntityKind, id: &str, name: &str) -> SearchHit {
    SearchHit {
        kind,
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Currently selected zone, incident and station (each independent).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub zone: Option<String>,
    pub incident: Option<String>,
    pub station: Option<String>,
}

impl Selection {
    fn slot(&mut self, kind: EntityKind) -> &mut Option<String> {
        match kind {
            EntityKind::Zone => &mut self.zone,
            EntityKind::Incident => &mut self.incident,
            EntityKind::Station => &mut self.station,
        }
    }

    pub fn get(&self, kind: EntityKind) -> Option<&str> {
        match kind {
            EntityKind::Zone => self.zone.as_deref(),
            EntityKind::Incident => self.incident.as_deref(),
            EntityKind::Station => self.station.as_deref(),
        }
    }

    pub fn select(&mut self, kind: EntityKind, id: &str) {
        *self.slot(kind) = Some(id.to_string());
    }

    /// Marker click: select `id`, or deselect it if it is already selected.
    pub fn toggle(&mut self, kind: EntityKind, id: &str) {
        let slot = self.slot(kind);
        if slot.as_deref() == Some(id) {
            *slot = None;
        } else {
            *slot = Some(id.to_string());
        }
    }

    pub fn is_selected(&self, kind: EntityKind, id: &str) -> bool {
        self.get(kind) == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.zone.is_none() && self.incident.is_none() && self.station.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

use firemap_core::entities::{FireIncident, IncidentStatus, RiskLevel};
use firemap_core::geometry::SurfacePoint;
use firemap_core::provider::{EntityProvider, Fixtures};
use firemap_core::search::{search, EntityKind, Selection};

fn names(provider: &dyn EntityProvider, query: &str) -> Vec<(EntityKind, String)> {
    search(provider, query)
        .into_iter()
        .map(|h| (h.kind, h.name))
        .collect()
}

fn incident(n: usize) -> FireIncident {
    FireIncident {
        id: format!("fire-x{n}"),
        name: format!("Ridge Fire {n}"),
        status: IncidentStatus::Active,
        acres: 10,
        containment_pct: 0,
        point: SurfacePoint::new(1.0, 1.0),
        start_date: "2025-09-01".into(),
        threat_level: RiskLevel::High,
    }
}

#[test]
fn test_empty_query_returns_nothing() {
    assert!(search(&Fixtures::sample(), "").is_empty());
}

#[test]
fn test_north_matches_zone_then_station() {
    let hits = names(&Fixtures::sample(), "north");
    assert_eq!(
        hits,
        [
            (EntityKind::Zone, "North Valley".to_string()),
            (EntityKind::Station, "North Station".to_string()),
        ]
    );
}

#[test]
fn test_search_is_case_insensitive() {
    let fixtures = Fixtures::sample();
    assert_eq!(names(&fixtures, "NORTH"), names(&fixtures, "north"));
    assert_eq!(names(&fixtures, "pInE").len(), 1);
}

#[test]
fn test_collection_order_and_array_order() {
    // "e" hits three zones (not "South Basin"), every incident and station.
    let hits = search(&Fixtures::sample(), "e");
    assert_eq!(hits.len(), 5);
    let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["zone-1", "zone-2", "zone-3", "fire-1", "fire-2"]);
}

#[test]
fn test_results_capped_at_five() {
    let mut fixtures = Fixtures::sample();
    fixtures.incidents = (0..8).map(incident).collect();
    let hits = search(&fixtures, "ridge fire");
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|h| h.kind == EntityKind::Incident));
    assert_eq!(hits[4].id, "fire-x4");
}

#[test]
fn test_selection_toggle_deselects() {
    let mut sel = Selection::default();
    sel.toggle(EntityKind::Zone, "zone-1");
    assert!(sel.is_selected(EntityKind::Zone, "zone-1"));

    sel.toggle(EntityKind::Zone, "zone-2");
    assert_eq!(sel.get(EntityKind::Zone), Some("zone-2"));

    sel.toggle(EntityKind::Zone, "zone-2");
    assert_eq!(sel.get(EntityKind::Zone), None);
    assert!(sel.is_empty());
}

#[test]
fn test_selection_kinds_are_independent() {
    let mut sel = Selection::default();
    sel.select(EntityKind::Incident, "fire-2");
    sel.select(EntityKind::Station, "ws-3");
    assert_eq!(sel.get(EntityKind::Incident), Some("fire-2"));
    assert_eq!(sel.get(EntityKind::Station), Some("ws-3"));
    assert_eq!(sel.get(EntityKind::Zone), None);

    sel.clear();
    assert!(sel.is_empty());
}

use console::Style;
use firemap_core::entities::{FireIncident, RiskLevel, RiskZone, WeatherStation};
use firemap_core::heatmap::{HeatmapPanel, MapRenderer};
use firemap_core::layers::LayerRegistry;
use firemap_core::risk_map::Scene;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    enabled: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            enabled: Style::new().green(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn risk_style(level: RiskLevel) -> Style {
    match level {
        RiskLevel::Low => Style::new().green(),
        RiskLevel::Moderate => Style::new().yellow(),
        RiskLevel::High => Style::new().color256(208),
        RiskLevel::Extreme => Style::new().red().bold(),
    }
}

fn risk_value_style(risk: f64) -> Style {
    match risk {
        r if r >= 0.75 => risk_style(RiskLevel::Extreme),
        r if r >= 0.5 => risk_style(RiskLevel::High),
        r if r >= 0.25 => risk_style(RiskLevel::Moderate),
        _ => risk_style(RiskLevel::Low),
    }
}

fn row(s: &Styles, label: &str, value: impl std::fmt::Display) {
    println!("    {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
}

pub fn print_zone(zone: &RiskZone) {
    let s = Styles::new();
    println!();
    println!(
        "  {}  {}",
        s.header.apply_to(&zone.name),
        risk_style(zone.risk_level).apply_to(zone.risk_level.label())
    );
    row(&s, "Temperature", format!("{:.0}°F", zone.temperature));
    row(&s, "Humidity", format!("{:.0}%", zone.humidity));
    row(&s, "Wind", format!("{:.0} mph", zone.wind_speed));
    row(&s, "Updated", &zone.last_updated);
}

pub fn print_incident(incident: &FireIncident) {
    let s = Styles::new();
    println!();
    println!(
        "  {}  {}",
        s.header.apply_to(&incident.name),
        risk_style(incident.threat_level).apply_to(incident.status)
    );
    row(&s, "Acres", incident.acres);
    row(&s, "Containment", format!("{}%", incident.containment_pct));
    row(&s, "Threat", incident.threat_level);
    row(&s, "Started", &incident.start_date);
}

pub fn print_station(station: &WeatherStation) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to(&station.name));
    row(&s, "Temperature", format!("{:.0}°F", station.temperature));
    row(&s, "Humidity", format!("{:.0}%", station.humidity));
    row(
        &s,
        "Wind",
        format!("{:.0} mph @ {}°", station.wind_speed, station.wind_direction_deg),
    );
    row(&s, "Reading", &station.last_reading);
}

pub fn print_layers(layers: &LayerRegistry) {
    let s = Styles::new();
    println!();
    println!("  {}", s.title.apply_to("Map Layers"));
    println!();
    for layer in layers.iter() {
        let state = if layer.enabled {
            s.enabled.apply_to("on ")
        } else {
            s.disabled.apply_to("off")
        };
        println!(
            "    {}  {:<20}{:>5.0}%  {}",
            state,
            layer.display_name,
            layer.opacity,
            s.label.apply_to(format!("{} / {}", layer.id, layer.color_tag))
        );
    }
}

pub fn print_scene(scene: &Scene<'_>) {
    let s = Styles::new();
    println!();
    println!("  {}", s.header.apply_to("Rendered"));
    if scene.rendered_layers.is_empty() {
        println!("    {}", s.disabled.apply_to("nothing"));
    } else {
        row(&s, "Layers", scene.rendered_layers.join(", "));
    }
    row(&s, "Zones", scene.zones.len());
    row(&s, "Incidents", scene.incidents.len());
    row(&s, "Stations", scene.stations.len());
    row(&s, "Wind arrows", scene.wind_arrows.len());
    row(&s, "Annotations", scene.annotations.len());
    println!();
}

pub fn print_heatmap<R: MapRenderer>(panel: &HeatmapPanel<R>, top: usize) {
    let s = Styles::new();
    let Some(source) = panel.source() else {
        return;
    };
    let mut points = source.points();

    println!();
    println!("  {}", s.title.apply_to("Heatmap"));
    println!();
    if let Some(date) = panel.shown_date() {
        row(&s, "Date", date);
    }
    row(&s, "Points", points.len());
    if points.is_empty() {
        println!();
        return;
    }

    if let Some(b) = source.bounds() {
        row(
            &s,
            "Bounds",
            format!("{:.3},{:.3} .. {:.3},{:.3}", b.west, b.south, b.east, b.north),
        );
        let c = b.center();
        row(&s, "Center", format!("{:.3}, {:.3}", c.lng, c.lat));
    }

    let (min, max, sum) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(lo, hi, sum), p| (lo.min(p.risk), hi.max(p.risk), sum + p.risk),
    );
    row(
        &s,
        "Risk",
        format!(
            "min {:.2}  mean {:.2}  max {:.2}",
            min,
            sum / points.len() as f64,
            max
        ),
    );

    points.sort_by(|a, b| b.risk.total_cmp(&a.risk));
    let shown = top.min(points.len());
    if shown > 0 {
        println!();
        println!("  {}", s.header.apply_to(format!("Top {} by risk", shown)));
        println!("    {:>9}  {:>10}  {:>5}", "Lat", "Lon", "Risk");
        for p in points.iter().take(shown) {
            println!(
                "    {:>9.4}  {:>10.4}  {}",
                p.lat,
                p.lon,
                risk_value_style(p.risk).apply_to(format!("{:>5.2}", p.risk))
            );
        }
    }
    println!();
}

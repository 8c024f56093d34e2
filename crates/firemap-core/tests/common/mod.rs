#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use firemap_core::error::{FiremapError, Result};
use firemap_core::geometry::{ScreenPos, SurfaceBox};
use firemap_core::heatmap::{GeoPoint, HeatmapDate, PointSource};

/// A 400x200 surface whose top-left corner sits at (100, 50) on screen.
pub fn surface() -> SurfaceBox {
    SurfaceBox::new(ScreenPos::new(100.0, 50.0), 400.0, 200.0)
}

/// Screen position of a surface-percent coordinate on [`surface`].
pub fn at(x_pct: f32, y_pct: f32) -> ScreenPos {
    let s = surface();
    ScreenPos::new(
        s.origin.x + x_pct / 100.0 * s.width,
        s.origin.y + y_pct / 100.0 * s.height,
    )
}

pub fn point(lat: f64, lon: f64, risk: f64) -> GeoPoint {
    GeoPoint { lat, lon, risk }
}

pub fn date(s: &str) -> HeatmapDate {
    s.parse().unwrap()
}

/// In-memory point source keyed by ISO date. Unknown dates fail.
#[derive(Default)]
pub struct StaticSource {
    by_date: HashMap<String, Vec<GeoPoint>>,
}

impl StaticSource {
    pub fn with(mut self, date: &str, points: Vec<GeoPoint>) -> Self {
        self.by_date.insert(date.to_string(), points);
        self
    }
}

impl PointSource for StaticSource {
    fn fetch_points(&self, date: &HeatmapDate) -> Result<Vec<GeoPoint>> {
        self.by_date
            .get(&date.to_string())
            .cloned()
            .ok_or_else(|| FiremapError::HttpStatus {
                status: 404,
                url: format!("static://{date}"),
            })
    }
}

/// Serve exactly one HTTP response on a local port.
///
/// Returns the base URL and a handle yielding the request line received.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (format!("http://{addr}"), handle)
}

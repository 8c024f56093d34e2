mod common;

use common::{date, serve_once};
use firemap_core::config::ApiConfig;
use firemap_core::error::FiremapError;
use firemap_core::heatmap::{HeatmapDate, HttpPointSource, PointSource};

fn source(base_url: &str) -> HttpPointSource {
    HttpPointSource::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
    })
    .unwrap()
}

#[test]
fn test_fetch_points_sends_date_query() {
    let body = r#"{"points":[{"lat":37.1,"lon":-119.6,"risk":0.42},{"lat":36.0,"lon":-118.0,"risk":1.0}]}"#;
    let (url, server) = serve_once(200, body);

    let points = source(&url).fetch_points(&date("2021-01-01")).unwrap();
    let request_line = server.join().unwrap();

    assert_eq!(request_line, "GET /api/heatmap?date=2021-01-01 HTTP/1.1");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].lat, 37.1);
    assert_eq!(points[0].lon, -119.6);
    assert_eq!(points[0].risk, 0.42);
}

#[test]
fn test_trailing_slash_in_base_url() {
    let (url, server) = serve_once(200, r#"{"points":[]}"#);
    let src = source(&format!("{url}/"));
    assert_eq!(src.endpoint(), format!("{url}/api/heatmap"));

    let points = src.fetch_points(&HeatmapDate::default()).unwrap();
    assert!(points.is_empty());
    assert_eq!(
        server.join().unwrap(),
        "GET /api/heatmap?date=2020-08-15 HTTP/1.1"
    );
}

#[test]
fn test_error_status_is_reported() {
    let (url, server) = serve_once(500, r#"{"error":"boom"}"#);
    let err = source(&url).fetch_points(&date("2020-08-15")).unwrap_err();
    server.join().unwrap();

    match err {
        FiremapError::HttpStatus { status, url: failed } => {
            assert_eq!(status, 500);
            assert!(failed.ends_with("/api/heatmap"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[test]
fn test_malformed_body_is_json_error() {
    let (url, server) = serve_once(200, r#"{"pts":[]}"#);
    let err = source(&url).fetch_points(&date("2020-08-15")).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, FiremapError::Json(_)));
}

#[test]
fn test_unreachable_backend_is_http_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = source(&format!("http://127.0.0.1:{port}"))
        .fetch_points(&date("2020-08-15"))
        .unwrap_err();
    assert!(matches!(err, FiremapError::Http(_)));
}

#[test]
fn test_date_parsing() {
    assert_eq!(date("2021-01-01").to_string(), "2021-01-01");
    assert_eq!(date(" 2020-08-15 "), HeatmapDate::default());
    for bad in ["", "2021-13-01", "yesterday", "2021/01/01"] {
        assert!(
            matches!(bad.parse::<HeatmapDate>(), Err(FiremapError::InvalidDate(_))),
            "{bad:?} should not parse"
        );
    }
}

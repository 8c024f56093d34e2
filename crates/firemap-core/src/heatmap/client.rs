use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::consts::{DEFAULT_HEATMAP_DATE, HEATMAP_ENDPOINT};
use crate::error::{FiremapError, Result};

use super::geo::GeoPoint;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date sent as the `date` query parameter (`YYYY-MM-DD`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeatmapDate(NaiveDate);

impl HeatmapDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Default for HeatmapDate {
    fn default() -> Self {
        DEFAULT_HEATMAP_DATE
            .parse()
            .unwrap_or(Self(NaiveDate::default()))
    }
}

impl FromStr for HeatmapDate {
    type Err = FiremapError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| FiremapError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for HeatmapDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Where heatmap points come from.
pub trait PointSource {
    /// All points for `date`. The result replaces any previous set.
    fn fetch_points(&self, date: &HeatmapDate) -> Result<Vec<GeoPoint>>;
}

/// Body of `GET /api/heatmap?date=...`.
#[derive(Debug, Deserialize)]
pub struct HeatmapResponse {
    pub points: Vec<GeoPoint>,
}

/// [`PointSource`] backed by the REST endpoint.
pub struct HttpPointSource {
    client: Client,
    base_url: String,
}

impl HttpPointSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, HEATMAP_ENDPOINT)
    }
}

impl PointSource for HttpPointSource {
    fn fetch_points(&self, date: &HeatmapDate) -> Result<Vec<GeoPoint>> {
        let url = self.endpoint();
        debug!(%url, %date, "requesting heatmap points");

        let response = self
            .client
            .get(&url)
            .query(&[("date", date.to_string())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FiremapError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text()?;
        let parsed: HeatmapResponse = serde_json::from_str(&body)?;
        info!(%date, points = parsed.points.len(), "heatmap points received");
        Ok(parsed.points)
    }
}

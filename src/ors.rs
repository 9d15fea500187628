use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{GEOCODE_COUNTRY, GEOCODE_TIMEOUT, ORS_BASE_URL, ROUTE_TIMEOUT};
use crate::types::RouteResponse;

/// Failure kinds for the OpenRouteService gateway. Timeout and not-found are
/// kept distinct from generic transport failure so the API layer can tell a
/// caller whether retrying makes sense.
#[derive(Debug, Error)]
pub enum OrsError {
    #[error("OpenRouteService timed out")]
    Timeout,
    #[error("no geocoding result for: {0}")]
    AddressNotFound(String),
    #[error("no route returned (empty \"features\")")]
    NoRoute,
    #[error("OpenRouteService returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("unexpected OpenRouteService response: {0}")]
    Decode(String),
    #[error("OpenRouteService request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for OrsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OrsError::Timeout
        } else {
            OrsError::Transport(err)
        }
    }
}

// ---------- OpenRouteService response shapes ----------

// Geocoding and directions both answer GeoJSON feature collections with
// coordinates in [lon, lat] order.

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    properties: DirectionsProperties,
    geometry: LineGeometry,
}

#[derive(Debug, Deserialize)]
struct DirectionsProperties {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    /// meters
    distance: f64,
    /// seconds
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    coordinates: Vec<[f64; 2]>,
}

// ---------- Gateway client ----------

pub struct OrsClient {
    http: Client,
    api_key: String,
}

impl OrsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// Resolves a free-text address to (lat, lon) using the top-ranked match.
    pub async fn geocode(&self, query: &str) -> Result<(f64, f64), OrsError> {
        let url = format!("{ORS_BASE_URL}/geocode/search");
        let resp = self
            .http
            .get(url)
            .query(&[
                ("text", query),
                ("size", "1"),
                ("boundary.country", GEOCODE_COUNTRY),
            ])
            .header("Authorization", &self.api_key)
            .timeout(GEOCODE_TIMEOUT)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let data: GeocodeResponse = resp.json().await?;

        top_match_latlon(data, query)
    }

    /// One directions call between two already-resolved coordinate pairs.
    pub async fn directions(
        &self,
        start: (f64, f64),
        end: (f64, f64),
    ) -> Result<RouteResponse, OrsError> {
        let url = format!("{ORS_BASE_URL}/v2/directions/driving-car/geojson");
        let (start_lat, start_lon) = start;
        let (end_lat, end_lon) = end;
        let body = serde_json::json!({
            "coordinates": [[start_lon, start_lat], [end_lon, end_lat]],
        });

        let resp = self
            .http
            .post(url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .timeout(ROUTE_TIMEOUT)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let data: DirectionsResponse = resp.json().await?;

        let feature = data.features.into_iter().next().ok_or(OrsError::NoRoute)?;
        Ok(build_route(start, end, feature))
    }

    /// Full pipeline for one route request: geocode both ends in order, then
    /// fetch directions. Any stage failing aborts the rest; nothing partial
    /// is kept.
    pub async fn route(
        &self,
        from_address: &str,
        to_address: &str,
    ) -> Result<RouteResponse, OrsError> {
        let start = self.geocode(from_address).await?;
        let end = self.geocode(to_address).await?;
        self.directions(start, end).await
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, OrsError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(OrsError::UpstreamStatus {
        status: status.as_u16(),
        body,
    })
}

fn top_match_latlon(data: GeocodeResponse, query: &str) -> Result<(f64, f64), OrsError> {
    let feature = data
        .features
        .into_iter()
        .next()
        .ok_or_else(|| OrsError::AddressNotFound(query.to_string()))?;

    // ORS answers [lon, lat]; internal convention is latitude first
    match feature.geometry.coordinates.as_slice() {
        [lon, lat, ..] => Ok((*lat, *lon)),
        short => Err(OrsError::Decode(format!(
            "geocode geometry carries {} coordinates",
            short.len()
        ))),
    }
}

fn build_route(start: (f64, f64), end: (f64, f64), feature: DirectionsFeature) -> RouteResponse {
    let polyline_latlon = feature
        .geometry
        .coordinates
        .iter()
        .map(|[lon, lat]| [*lat, *lon])
        .collect();

    RouteResponse {
        distance_km: feature.properties.summary.distance / 1000.0,
        duration_min: feature.properties.summary.duration / 60.0,
        start_lat: start.0,
        start_lon: start.1,
        end_lat: end.0,
        end_lon: end.1,
        polyline_latlon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOCODE_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [18.0686, 59.3293] },
                "properties": { "label": "Stockholm, Sweden", "confidence": 1.0 }
            }
        ]
    }"#;

    const DIRECTIONS_FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "summary": { "distance": 12345.0, "duration": 600.0 }
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[18.0686, 59.3293], [18.0710, 59.3300], [17.9930, 59.3600]]
                }
            }
        ]
    }"#;

    #[test]
    fn geocode_top_match_is_flipped_to_lat_lon() {
        let data: GeocodeResponse = serde_json::from_str(GEOCODE_FIXTURE).unwrap();
        let (lat, lon) = top_match_latlon(data, "Stockholm").unwrap();
        assert_eq!(lat, 59.3293);
        assert_eq!(lon, 18.0686);
    }

    #[test]
    fn empty_geocode_features_is_address_not_found() {
        let data: GeocodeResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        let err = top_match_latlon(data, "Nowhere Street 99").unwrap_err();
        assert!(matches!(err, OrsError::AddressNotFound(_)));
        assert!(err.to_string().contains("Nowhere Street 99"));
    }

    #[test]
    fn missing_features_key_is_address_not_found() {
        // geocoding occasionally answers without the key at all
        let data: GeocodeResponse = serde_json::from_str(r#"{"type": "FeatureCollection"}"#).unwrap();
        assert!(matches!(
            top_match_latlon(data, "x"),
            Err(OrsError::AddressNotFound(_))
        ));
    }

    #[test]
    fn short_geometry_is_a_decode_error() {
        let data: GeocodeResponse = serde_json::from_str(
            r#"{"features": [{"geometry": {"coordinates": [18.0686]}}]}"#,
        )
        .unwrap();
        assert!(matches!(top_match_latlon(data, "x"), Err(OrsError::Decode(_))));
    }

    #[test]
    fn route_summary_units_and_polyline_flip() {
        let data: DirectionsResponse = serde_json::from_str(DIRECTIONS_FIXTURE).unwrap();
        let feature = data.features.into_iter().next().unwrap();
        let route = build_route((59.3293, 18.0686), (59.3600, 17.9930), feature);

        assert!((route.distance_km - 12.345).abs() < 1e-9);
        assert!((route.duration_min - 10.0).abs() < 1e-9);
        assert_eq!(route.start_lat, 59.3293);
        assert_eq!(route.start_lon, 18.0686);
        assert_eq!(route.end_lat, 59.3600);
        assert_eq!(route.end_lon, 17.9930);

        // every pair flipped from the provider's [lon, lat]
        assert_eq!(route.polyline_latlon[0], [59.3293, 18.0686]);
        assert_eq!(route.polyline_latlon[1], [59.3300, 18.0710]);
        assert_eq!(route.polyline_latlon[2], [59.3600, 17.9930]);
    }

    #[test]
    fn empty_directions_features_parse_as_empty() {
        // the client maps this case to NoRoute before build_route runs
        let data: DirectionsResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert!(data.features.is_empty());
    }
}

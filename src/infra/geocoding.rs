use crate::app::ports::Geocoder;
use crate::constants::{GEOCODE_STATUS_OK, PROVINCE_PREFIX};
use crate::domain::Coordinate;
use crate::error::{CenterError, Result};
use crate::infra::http_client::NcpCredentials;
use crate::metrics::MapApiMetrics;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

static PROVINCE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}\s+", regex::escape(PROVINCE_PREFIX)))
        .expect("province prefix pattern is valid")
});

/// Drops one leading `경기` province token (only when followed by
/// whitespace) and trims the rest.
pub fn normalize_address(address: &str) -> String {
    PROVINCE_PREFIX_RE.replace(address, "").trim().to_string()
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    addresses: Vec<GeocodeAddress>,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeAddress {
    /// Longitude, as a decimal string
    x: String,
    /// Latitude, as a decimal string
    y: String,
}

impl GeocodeResponse {
    fn first_coordinate(&self, address: &str) -> Result<Coordinate> {
        if self.status != GEOCODE_STATUS_OK {
            return Err(geocoding_error(format!(
                "status {} for {address}{}",
                self.status,
                self.error_message
                    .as_deref()
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default()
            )));
        }
        let first = self
            .addresses
            .first()
            .ok_or_else(|| geocoding_error(format!("no candidates for {address}")))?;
        let longitude: f64 = first
            .x
            .trim()
            .parse()
            .map_err(|_| geocoding_error(format!("bad longitude '{}'", first.x)))?;
        let latitude: f64 = first
            .y
            .trim()
            .parse()
            .map_err(|_| geocoding_error(format!("bad latitude '{}'", first.y)))?;
        Ok(Coordinate::new(longitude, latitude))
    }
}

fn geocoding_error(message: String) -> CenterError {
    CenterError::Geocoding { message }
}

/// NAVER Cloud geocoding client.
pub struct NaverGeocoder {
    client: reqwest::Client,
    endpoint: String,
    credentials: NcpCredentials,
}

impl NaverGeocoder {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, credentials: NcpCredentials) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    pub fn request_url(&self, address: &str) -> Result<Url> {
        Url::parse_with_params(&self.endpoint, &[("query", normalize_address(address))])
            .map_err(|e| geocoding_error(format!("invalid endpoint {}: {e}", self.endpoint)))
    }

    async fn fetch(&self, address: &str) -> Result<Coordinate> {
        let url = self.request_url(address)?;
        debug!("Geocoding {}", url);

        let response = self
            .credentials
            .sign(self.client.get(url))
            .send()
            .await
            .map_err(|e| geocoding_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(geocoding_error(format!("HTTP {status}: {body}")));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| geocoding_error(format!("unreadable response: {e}")))?;
        body.first_coordinate(address)
    }
}

#[async_trait]
impl Geocoder for NaverGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate> {
        let result = self.fetch(address).await;
        MapApiMetrics::record_geocode(result.is_ok());
        if let Err(e) = &result {
            warn!("Geocoding failed for {address}: {e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn geocoder() -> NaverGeocoder {
        NaverGeocoder::new(
            reqwest::Client::new(),
            "https://maps.example.com/geocode",
            NcpCredentials::new("id", "secret"),
        )
    }

    #[test]
    fn strips_province_prefix_only_at_start() {
        assert_eq!(normalize_address("경기 성남시 수정구 수정로 100"), "성남시 수정구 수정로 100");
        assert_eq!(normalize_address("경기   성남시"), "성남시");
        assert_eq!(normalize_address("경기도 성남시"), "경기도 성남시");
        assert_eq!(normalize_address(" 성남시 경기 로 1 "), "성남시 경기 로 1");
    }

    #[test]
    fn query_carries_normalized_address() {
        let url = geocoder().request_url("경기 성남시 분당구").unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(query, vec![("query".to_string(), "성남시 분당구".to_string())]);
    }

    #[test]
    fn first_candidate_is_used() {
        let body: GeocodeResponse = serde_json::from_value(json!({
            "status": "OK",
            "addresses": [
                {"x": "127.1412", "y": "37.4430", "roadAddress": "경기도 성남시"},
                {"x": "0", "y": "0"}
            ]
        }))
        .unwrap();
        let c = body.first_coordinate("성남시").unwrap();
        assert_eq!(c.longitude, 127.1412);
        assert_eq!(c.latitude, 37.4430);
    }

    #[test]
    fn non_ok_status_and_empty_candidates_fail() {
        let failed: GeocodeResponse =
            serde_json::from_value(json!({"status": "INVALID_REQUEST", "addresses": []})).unwrap();
        assert!(matches!(
            failed.first_coordinate("x"),
            Err(CenterError::Geocoding { .. })
        ));

        let empty: GeocodeResponse =
            serde_json::from_value(json!({"status": "OK", "addresses": []})).unwrap();
        assert!(empty.first_coordinate("x").is_err());

        let garbled: GeocodeResponse =
            serde_json::from_value(json!({"status": "OK", "addresses": [{"x": "east", "y": "1"}]}))
                .unwrap();
        assert!(garbled.first_coordinate("x").is_err());
    }
}

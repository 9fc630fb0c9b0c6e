use crate::app::ports::DirectionsProvider;
use crate::constants::OPTIMAL_ROUTE_OPTION;
use crate::domain::{present, RouteResponse};
use crate::error::{CenterError, Result};
use crate::infra::http_client::NcpCredentials;
use crate::metrics::MapApiMetrics;
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, instrument, warn};

fn directions_error(message: String) -> CenterError {
    CenterError::Directions { message }
}

/// `<endpoint>?start=..&goal=..&option=traoptimal[&waypoints=..]`
pub fn build_route_url(
    endpoint: &str,
    start: &str,
    waypoints: Option<&str>,
    goal: &str,
) -> Result<Url> {
    let mut params = vec![
        ("start", start.to_string()),
        ("goal", goal.to_string()),
        ("option", OPTIMAL_ROUTE_OPTION.to_string()),
    ];
    if let Some(waypoints) = present(waypoints) {
        params.push(("waypoints", waypoints));
    }
    Url::parse_with_params(endpoint, &params)
        .map_err(|e| directions_error(format!("invalid endpoint {endpoint}: {e}")))
}

/// NAVER Cloud driving directions client.
pub struct NaverDirections {
    client: reqwest::Client,
    endpoint: String,
    credentials: NcpCredentials,
}

impl NaverDirections {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, credentials: NcpCredentials) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    async fn fetch(&self, url: Url) -> Result<RouteResponse> {
        let response = self
            .credentials
            .sign(self.client.get(url))
            .send()
            .await
            .map_err(|e| directions_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(directions_error(format!("HTTP {status}: {body}")));
        }

        response
            .json::<RouteResponse>()
            .await
            .map_err(|e| directions_error(format!("unreadable response: {e}")))
    }
}

#[async_trait]
impl DirectionsProvider for NaverDirections {
    #[instrument(skip(self))]
    async fn route(
        &self,
        start: &str,
        waypoints: Option<&str>,
        goal: &str,
    ) -> Result<RouteResponse> {
        let url = build_route_url(&self.endpoint, start, waypoints, goal)?;
        debug!("Requesting directions {}", url);

        let result = self.fetch(url).await;
        MapApiMetrics::record_directions(result.is_ok());
        match &result {
            Ok(body) => info!(code = body.code, "Directions response received"),
            Err(e) => warn!("Directions request failed: {e}"),
        }
        result
    }
}

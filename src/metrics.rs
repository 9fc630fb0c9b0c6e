//! Prometheus metrics for location writes and map API calls.
//!
//! The recorder is installed once at start-up; recording before that (or in
//! tests) is a no-op.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const LOCATIONS_CREATED: &str = "center_locations_created_total";
pub const LOCATIONS_UPDATED: &str = "center_locations_updated_total";
pub const STATUS_CHANGES: &str = "center_location_status_changes_total";
pub const DUPLICATES_REJECTED: &str = "center_duplicates_rejected_total";
pub const GEOCODE_REQUESTS: &str = "center_geocode_requests_total";
pub const DIRECTIONS_REQUESTS: &str = "center_directions_requests_total";

/// Installs the Prometheus recorder. Safe to call twice; the second call only warns.
pub fn init_metrics() {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if METRICS_HANDLE.set(handle).is_err() {
                warn!("Metrics handle already set");
            }
            register();
            info!("Prometheus recorder installed");
        }
        Err(e) => warn!("Prometheus recorder install failed (possibly already installed): {e}"),
    }
}

/// Text exposition for `/metrics`, empty when no recorder is installed.
pub fn render() -> String {
    METRICS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

fn register() {
    describe_counter!(LOCATIONS_CREATED, "Locations registered");
    describe_counter!(LOCATIONS_UPDATED, "Locations updated");
    describe_counter!(STATUS_CHANGES, "Location status changes");
    describe_counter!(
        DUPLICATES_REJECTED,
        "Create requests rejected as duplicates, labeled by match kind"
    );
    describe_counter!(GEOCODE_REQUESTS, "Geocoding API calls by outcome");
    describe_counter!(DIRECTIONS_REQUESTS, "Directions API calls by outcome");
}

pub struct LocationMetrics;

impl LocationMetrics {
    pub fn record_created() {
        counter!(LOCATIONS_CREATED).increment(1);
    }

    pub fn record_updated() {
        counter!(LOCATIONS_UPDATED).increment(1);
    }

    pub fn record_status_change(status_code: i64) {
        counter!(STATUS_CHANGES, "status" => status_code.to_string()).increment(1);
    }

    pub fn record_duplicate(kind: &'static str) {
        counter!(DUPLICATES_REJECTED, "kind" => kind).increment(1);
    }
}

pub struct MapApiMetrics;

impl MapApiMetrics {
    pub fn record_geocode(success: bool) {
        counter!(GEOCODE_REQUESTS, "outcome" => outcome(success)).increment(1);
    }

    pub fn record_directions(success: bool) {
        counter!(DIRECTIONS_REQUESTS, "outcome" => outcome(success)).increment(1);
    }
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

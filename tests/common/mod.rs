#![allow(dead_code)]

use async_trait::async_trait;
use center_search::app::ports::{DirectionsProvider, Geocoder};
use center_search::domain::{Coordinate, RouteResponse};
use center_search::error::{CenterError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Meters per degree of latitude on the sphere used by the distance check.
pub const METERS_PER_DEGREE_LAT: f64 = std::f64::consts::PI / 180.0 * 6_371_000.0;

/// Geocoder answering from a fixed table; unknown addresses fail.
#[derive(Default)]
pub struct TableGeocoder {
    known: Mutex<HashMap<String, Coordinate>>,
    calls: AtomicUsize,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, address: &str, longitude: f64, latitude: f64) -> Self {
        self.known
            .lock()
            .unwrap()
            .insert(address.to_string(), Coordinate::new(longitude, latitude));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .ok_or_else(|| CenterError::Geocoding {
                message: format!("no result for {address}"),
            })
    }
}

/// Directions provider returning a canned response.
pub struct CannedDirections {
    pub response: Option<RouteResponse>,
}

#[async_trait]
impl DirectionsProvider for CannedDirections {
    async fn route(&self, _start: &str, _waypoints: Option<&str>, _goal: &str) -> Result<RouteResponse> {
        self.response.clone().ok_or_else(|| CenterError::Directions {
            message: "HTTP 401 Unauthorized".to_string(),
        })
    }
}

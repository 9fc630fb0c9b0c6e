use crate::app::ports::{DirectionsProvider, Geocoder, LocationRepository};
use crate::app::{CenterViewService, DuplicatePolicy, LocationService, SearchService};
use std::sync::Arc;

/// Shared handler state. Cheap to clone; every service holds `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub locations: LocationService,
    pub search: SearchService,
    pub views: CenterViewService,
    pub directions: Arc<dyn DirectionsProvider>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn LocationRepository>,
        geocoder: Arc<dyn Geocoder>,
        directions: Arc<dyn DirectionsProvider>,
        policy: DuplicatePolicy,
    ) -> Self {
        let locations = LocationService::with_policy(repo.clone(), geocoder, policy);
        Self {
            search: SearchService::new(repo),
            views: CenterViewService::new(locations.clone()),
            locations,
            directions,
        }
    }
}

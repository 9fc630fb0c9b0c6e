//! Flat display records for each page, built from active locations.

use crate::app::location_service::LocationService;
use crate::constants::{MAIN_PAGE_GROUP_LIMIT, REGIONS};
use crate::domain::{present, Guide, Location, RouteResponse};
use crate::error::{CenterError, Result};
use serde::Serialize;

/// Locations whose address mentions one sub-region token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGroup<T> {
    pub region: String,
    pub locations: Vec<T>,
}

/// Map marker payload for the JSON API and the index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMarker {
    pub id: i64,
    pub name: String,
    pub tel: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&Location> for LocationMarker {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.to_string(),
            tel: loc.number.to_string(),
            address: loc.address.to_string(),
            lat: loc.latitude.value(),
            lng: loc.longitude.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterMainView {
    pub id: i64,
    pub name: String,
    pub number: String,
    pub address: String,
}

impl From<&Location> for CenterMainView {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.to_string(),
            number: loc.number.to_string(),
            address: loc.address.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterLocateView {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for CenterLocateView {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.to_string(),
            address: loc.address.to_string(),
            latitude: loc.latitude.value(),
            longitude: loc.longitude.value(),
        }
    }
}

/// Same shape as the main page entry; the quarter page also gets the region tokens.
pub type QuarterView = CenterMainView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterDetailView {
    pub id: i64,
    pub name: String,
    pub number: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for CenterDetailView {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.to_string(),
            number: loc.number.to_string(),
            address: loc.address.to_string(),
            latitude: loc.latitude.value(),
            longitude: loc.longitude.value(),
        }
    }
}

pub type CenterUpdateView = CenterMainView;

/// State carried between the steps of the route wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Navigation {
    pub start: String,
    pub start_name: String,
    pub waypoints: Option<String>,
    pub waypoint_names: Option<String>,
    pub goal: Option<String>,
    pub goal_name: Option<String>,
}

impl Navigation {
    pub fn start(start: &str, start_name: &str) -> Self {
        Self {
            start: start.to_string(),
            start_name: start_name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_waypoints(mut self, waypoints: Option<&str>, waypoint_names: Option<&str>) -> Self {
        self.waypoints = present(waypoints);
        self.waypoint_names = present(waypoint_names);
        self
    }

    pub fn with_goal(mut self, goal: &str, goal_name: &str) -> Self {
        self.goal = Some(goal.to_string());
        self.goal_name = Some(goal_name.to_string());
        self
    }
}

/// Summary of the first optimal route, as shown on the result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResultView {
    pub distance_m: i64,
    pub duration_ms: i64,
    pub toll_fare: i64,
    pub fuel_price: i64,
    pub guides: Vec<Guide>,
    pub path: Vec<[f64; 2]>,
}

impl RouteResultView {
    /// The optimal route, or the inline "no route" message when the
    /// provider returned a non-zero code or no routes.
    pub fn from_response(response: &RouteResponse) -> std::result::Result<Self, String> {
        match response.optimal() {
            Some(optimal) => Ok(Self {
                distance_m: optimal.summary.distance,
                duration_ms: optimal.summary.duration,
                toll_fare: optimal.summary.toll_fare,
                fuel_price: optimal.summary.fuel_price,
                guides: optimal.guide.clone(),
                path: optimal.path.clone(),
            }),
            None => Err(format!(
                "no route found (code: {}, message: {})",
                response.code,
                response.message_or_empty()
            )),
        }
    }

    pub fn distance_km(&self) -> String {
        format!("{:.1}", self.distance_m as f64 / 1000.0)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.duration_ms as f64 / 60_000.0).round() as i64
    }
}

/// Builds the per-page view models.
#[derive(Clone)]
pub struct CenterViewService {
    locations: LocationService,
}

impl CenterViewService {
    pub fn new(locations: LocationService) -> Self {
        Self { locations }
    }

    pub async fn markers(&self) -> Result<Vec<LocationMarker>> {
        let active = self.locations.find_all_active().await?;
        Ok(active.iter().map(LocationMarker::from).collect())
    }

    pub async fn main_groups(&self) -> Result<Vec<RegionGroup<CenterMainView>>> {
        let active = self.locations.find_all_active().await?;
        Ok(group_by_region(&active, Some(MAIN_PAGE_GROUP_LIMIT)))
    }

    pub async fn locate_groups(&self) -> Result<Vec<RegionGroup<CenterLocateView>>> {
        let active = self.locations.find_all_active().await?;
        Ok(group_by_region(&active, None))
    }

    pub async fn selected_locates(&self, ids: &[i64]) -> Result<Vec<CenterLocateView>> {
        let selected = self.locations.find_active_by_ids(ids).await?;
        Ok(selected.iter().map(CenterLocateView::from).collect())
    }

    pub async fn quarter(&self, area: &str) -> Result<Vec<QuarterView>> {
        let active = self.locations.find_all_active().await?;
        Ok(active
            .iter()
            .filter(|loc| loc.address.contains(area))
            .map(QuarterView::from)
            .collect())
    }

    pub async fn detail(&self, id: i64) -> Result<CenterDetailView> {
        self.locations
            .find_by_id(id)
            .await?
            .filter(Location::is_active)
            .map(|loc| CenterDetailView::from(&loc))
            .ok_or(CenterError::NotFound { id })
    }

    pub async fn update_form(&self, id: i64) -> Result<Option<CenterUpdateView>> {
        Ok(self
            .locations
            .find_by_id(id)
            .await?
            .filter(Location::is_active)
            .map(|loc| CenterUpdateView::from(&loc)))
    }

    pub fn navigation_start(&self, start: &str, start_name: &str) -> Navigation {
        Navigation::start(start, start_name)
    }

    pub fn navigation_waypoints(
        &self,
        start: &str,
        start_name: &str,
        waypoints: Option<&str>,
        waypoint_names: Option<&str>,
    ) -> Navigation {
        Navigation::start(start, start_name).with_waypoints(waypoints, waypoint_names)
    }
}

/// Groups in [`REGIONS`] order; a location appears in every group whose
/// token its address contains. Inactive locations are skipped.
pub fn group_by_region<'a, T>(locations: &'a [Location], limit: Option<usize>) -> Vec<RegionGroup<T>>
where
    T: From<&'a Location>,
{
    REGIONS
        .iter()
        .map(|region| RegionGroup {
            region: region.to_string(),
            locations: locations
                .iter()
                .filter(|loc| loc.is_active() && loc.address.contains(region))
                .take(limit.unwrap_or(usize::MAX))
                .map(T::from)
                .collect(),
        })
        .collect()
}

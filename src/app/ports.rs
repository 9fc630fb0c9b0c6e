use crate::domain::{Coordinate, Location, LocationDetails, LocationStatus, RouteResponse};
use crate::error::Result;
use async_trait::async_trait;

/// Relational store for locations. Rows are never deleted; status is the soft-delete flag.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Inserts a new row and returns it with its assigned id.
    async fn insert(&self, details: LocationDetails, status: LocationStatus) -> Result<Location>;

    /// Writes back every field of an existing row.
    async fn save(&self, location: &Location) -> Result<()>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>>;
    async fn find_all(&self) -> Result<Vec<Location>>;
    async fn find_by_status(&self, status: LocationStatus) -> Result<Vec<Location>>;
    async fn find_all_by_ids_and_status(
        &self,
        ids: &[i64],
        status: LocationStatus,
    ) -> Result<Vec<Location>>;

    /// Returns the number of rows touched.
    async fn update_status(&self, id: i64, status: LocationStatus) -> Result<usize>;

    /// Name or address contains `keyword`; name-prefix matches first, then
    /// name matches, then address-only matches, ties by name.
    async fn search_by_keyword(&self, keyword: &str, status: LocationStatus)
        -> Result<Vec<Location>>;
    async fn search_by_name(&self, keyword: &str, status: LocationStatus) -> Result<Vec<Location>>;
    async fn search_by_address(&self, keyword: &str, status: LocationStatus)
        -> Result<Vec<Location>>;
}

/// Address to coordinate resolution.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinate>;
}

/// Multi-waypoint driving directions. Callers interpret a non-zero code or
/// an empty route list as "no route found".
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn route(
        &self,
        start: &str,
        waypoints: Option<&str>,
        goal: &str,
    ) -> Result<RouteResponse>;
}

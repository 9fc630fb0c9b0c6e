use crate::app::ports::{Geocoder, LocationRepository};
use crate::constants::DUPLICATE_RADIUS_M;
use crate::domain::{
    is_within_range, Coordinate, Location, LocationAddress, LocationDetails, LocationName,
    LocationNumber, LocationStatus,
};
use crate::error::{CenterError, Result};
use crate::metrics::LocationMetrics;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Form payload for creating or updating a location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location_number: String,
    #[serde(default)]
    pub location_address: String,
}

impl LocationRequest {
    fn validate(&self) -> Result<(LocationNumber, LocationName, LocationAddress)> {
        Ok((
            LocationNumber::new(&self.location_number)?,
            LocationName::new(&self.location_name)?,
            LocationAddress::new(&self.location_address)?,
        ))
    }
}

/// How the duplicate check behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicatePolicy {
    pub radius_m: f64,
    /// When geocoding fails during the check, treat the address as unique
    /// instead of failing the request.
    pub fail_open_on_geocode_error: bool,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self {
            radius_m: DUPLICATE_RADIUS_M,
            fail_open_on_geocode_error: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuplicateCheck {
    SameAddress,
    WithinRadius { location_id: i64, distance_m: f64 },
    /// Not a duplicate. Carries the coordinate if the check geocoded one.
    Unique { coordinate: Option<Coordinate> },
}

impl DuplicateCheck {
    pub fn is_duplicate(&self) -> bool {
        !matches!(self, DuplicateCheck::Unique { .. })
    }
}

#[derive(Clone)]
pub struct LocationService {
    repo: Arc<dyn LocationRepository>,
    geocoder: Arc<dyn Geocoder>,
    policy: DuplicatePolicy,
    /// Held from the duplicate check through the insert.
    create_lock: Arc<Mutex<()>>,
}

impl LocationService {
    pub fn new(repo: Arc<dyn LocationRepository>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_policy(repo, geocoder, DuplicatePolicy::default())
    }

    pub fn with_policy(
        repo: Arc<dyn LocationRepository>,
        geocoder: Arc<dyn Geocoder>,
        policy: DuplicatePolicy,
    ) -> Self {
        Self {
            repo,
            geocoder,
            policy,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    #[instrument(skip(self, request), fields(address = %request.location_address))]
    pub async fn create(&self, request: &LocationRequest) -> Result<Location> {
        let (number, name, address) = request.validate()?;

        // Concurrent creates of the same address must see each other's insert
        let _guard = self.create_lock.lock().await;
        let coordinate = match self.check_duplicate(&address).await? {
            DuplicateCheck::Unique { coordinate } => coordinate,
            check => {
                LocationMetrics::record_duplicate(match check {
                    DuplicateCheck::SameAddress => "address",
                    _ => "radius",
                });
                info!(?check, "Rejected duplicate location");
                return Err(CenterError::Duplicate {
                    address: address.as_str().to_string(),
                });
            }
        };

        let coordinate = match coordinate {
            Some(c) => c,
            None => self.geocoder.geocode(address.as_str()).await?,
        };
        let (latitude, longitude) = coordinate.to_values()?;

        let details = LocationDetails {
            number,
            name,
            address,
            latitude,
            longitude,
        };
        let location = self.repo.insert(details, LocationStatus::Active).await?;

        LocationMetrics::record_created();
        info!(id = location.id, name = %location.name, "Created location");
        Ok(location)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Location>> {
        self.repo.find_all().await
    }

    pub async fn find_all_active(&self) -> Result<Vec<Location>> {
        self.repo.find_by_status(LocationStatus::Active).await
    }

    pub async fn find_active_by_ids(&self, ids: &[i64]) -> Result<Vec<Location>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repo
            .find_all_by_ids_and_status(ids, LocationStatus::Active)
            .await
    }

    /// Re-geocodes the new address and replaces every value object.
    /// No duplicate check runs on update.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &LocationRequest) -> Result<Location> {
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CenterError::NotFound { id })?;

        let (number, name, address) = request.validate()?;
        let coordinate = self.geocoder.geocode(address.as_str()).await?;
        let (latitude, longitude) = coordinate.to_values()?;

        existing.update_with(LocationDetails {
            number,
            name,
            address,
            latitude,
            longitude,
        });
        self.repo.save(&existing).await?;

        LocationMetrics::record_updated();
        info!(id, "Updated location");
        Ok(existing)
    }

    #[instrument(skip(self))]
    pub async fn change_status(&self, id: i64, status: LocationStatus) -> Result<()> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(CenterError::NotFound { id });
        }
        if self.repo.update_status(id, status).await? == 0 {
            return Err(CenterError::NotFound { id });
        }
        LocationMetrics::record_status_change(status.code());
        info!(id, status = status.code(), "Changed location status");
        Ok(())
    }

    pub async fn is_duplicate(&self, address: &str) -> Result<bool> {
        let address = LocationAddress::new(address)?;
        Ok(self.check_duplicate(&address).await?.is_duplicate())
    }

    /// Exact address match against active locations first, then a
    /// geocode-and-radius match.
    pub async fn check_duplicate(&self, address: &LocationAddress) -> Result<DuplicateCheck> {
        let active = self.repo.find_by_status(LocationStatus::Active).await?;

        if active.iter().any(|loc| loc.address == *address) {
            return Ok(DuplicateCheck::SameAddress);
        }

        let candidate = match self.geocoder.geocode(address.as_str()).await {
            Ok(c) => c,
            Err(e) if self.policy.fail_open_on_geocode_error => {
                warn!("Coordinate duplicate check skipped, geocoding failed: {e}");
                return Ok(DuplicateCheck::Unique { coordinate: None });
            }
            Err(e) => return Err(e),
        };

        let nearby = active
            .iter()
            .find(|loc| is_within_range(&candidate, &loc.coordinate(), self.policy.radius_m));
        if let Some(loc) = nearby {
            let distance_m = crate::domain::haversine_distance_m(&candidate, &loc.coordinate());
            debug!(location_id = loc.id, distance_m, "Candidate within duplicate radius");
            return Ok(DuplicateCheck::WithinRadius {
                location_id: loc.id,
                distance_m,
            });
        }

        Ok(DuplicateCheck::Unique {
            coordinate: Some(candidate),
        })
    }
}

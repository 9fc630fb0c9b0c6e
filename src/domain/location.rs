use crate::domain::geo::Coordinate;
use crate::domain::values::{Latitude, LocationAddress, LocationName, LocationNumber, Longitude};
use crate::error::{CenterError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Soft-delete flag. Stored as `1` (active) / `0` (inactive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum LocationStatus {
    Inactive,
    Active,
}

impl LocationStatus {
    pub fn code(self) -> i64 {
        match self {
            LocationStatus::Inactive => 0,
            LocationStatus::Active => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(LocationStatus::Inactive),
            1 => Ok(LocationStatus::Active),
            other => Err(CenterError::invalid(format!(
                "Unknown location status: {other}"
            ))),
        }
    }
}

impl From<LocationStatus> for i64 {
    fn from(status: LocationStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for LocationStatus {
    type Error = CenterError;

    fn try_from(code: i64) -> Result<Self> {
        LocationStatus::from_code(code)
    }
}

/// The validated value objects of a location, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDetails {
    pub number: LocationNumber,
    pub name: LocationName,
    pub address: LocationAddress,
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl LocationDetails {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from((self.latitude, self.longitude))
    }
}

/// A registered center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    #[serde(rename = "locationNumber")]
    pub number: LocationNumber,
    #[serde(rename = "locationName")]
    pub name: LocationName,
    #[serde(rename = "locationAddress")]
    pub address: LocationAddress,
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub status: LocationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn new(id: i64, details: LocationDetails, status: LocationStatus, now: DateTime<Utc>) -> Self {
        Self {
            id,
            number: details.number,
            name: details.name,
            address: details.address,
            latitude: details.latitude,
            longitude: details.longitude,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every value object at once; id, status and creation time are kept.
    pub fn update_with(&mut self, details: LocationDetails) -> &mut Self {
        self.number = details.number;
        self.name = details.name;
        self.address = details.address;
        self.latitude = details.latitude;
        self.longitude = details.longitude;
        self.updated_at = Utc::now();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == LocationStatus::Active
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from((self.latitude, self.longitude))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::details;
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(LocationStatus::from_code(1).unwrap(), LocationStatus::Active);
        assert_eq!(LocationStatus::from_code(0).unwrap(), LocationStatus::Inactive);
        assert!(LocationStatus::from_code(2).is_err());
        assert_eq!(LocationStatus::Active.code(), 1);
    }

    #[test]
    fn update_with_replaces_values_but_keeps_identity() {
        let created = Utc::now();
        let mut location = Location::new(
            7,
            details("태평경로당", "성남시 수정구 태평로 1", 37.44, 127.13),
            LocationStatus::Active,
            created,
        );

        location.update_with(details("신흥경로당", "성남시 수정구 신흥로 2", 37.45, 127.14));

        assert_eq!(location.id, 7);
        assert_eq!(location.name.as_str(), "신흥경로당");
        assert_eq!(location.address.as_str(), "성남시 수정구 신흥로 2");
        assert_eq!(location.latitude.value(), 37.45);
        assert_eq!(location.created_at, created);
        assert!(location.is_active());
    }

    #[test]
    fn serializes_with_flat_value_objects() {
        let location = Location::new(
            1,
            details("야탑경로당", "성남시 분당구 야탑로 5", 37.41, 127.12),
            LocationStatus::Active,
            Utc::now(),
        );
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["locationName"], "야탑경로당");
        assert_eq!(json["locationNumber"], "031-729-0000");
        assert_eq!(json["latitude"], 37.41);
        assert_eq!(json["status"], 1);
    }
}

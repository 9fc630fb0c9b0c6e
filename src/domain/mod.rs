//! Domain data shapes shared across layers

pub mod geo;
pub mod location;
pub mod route;
pub mod values;

pub use geo::{haversine_distance_m, is_within_range, within_range, Coordinate};
pub use location::{Location, LocationDetails, LocationStatus};
pub use route::{present, Guide, OptimalRoute, Route, RouteResponse, RouteSummary};
pub use values::{Latitude, LocationAddress, LocationName, LocationNumber, Longitude};

//! Outbound adapters for the map APIs.

pub mod directions;
pub mod geocoding;
pub mod http_client;

pub use directions::{build_route_url, NaverDirections};
pub use geocoding::{normalize_address, NaverGeocoder};
pub use http_client::{build_client, NcpCredentials};

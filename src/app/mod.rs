pub mod ports;
pub mod location_service;
pub mod search_service;
pub mod view_models;

pub use location_service::{DuplicateCheck, DuplicatePolicy, LocationRequest, LocationService};
pub use search_service::SearchService;
pub use view_models::CenterViewService;

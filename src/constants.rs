/// Sub-region tokens used to group centers. Order is the display order.
pub const SUJEONG_GU: &str = "수정구";
pub const BUNDANG_GU: &str = "분당구";
pub const JUNGWON_GU: &str = "중원구";

pub const REGIONS: [&str; 3] = [SUJEONG_GU, BUNDANG_GU, JUNGWON_GU];

/// Province token stripped from the front of an address before geocoding
pub const PROVINCE_PREFIX: &str = "경기";

/// Entries shown per region on the main page
pub const MAIN_PAGE_GROUP_LIMIT: usize = 5;

// Value object limits, counted in characters
pub const NAME_MAX_CHARS: usize = 60;
pub const NUMBER_MAX_CHARS: usize = 60;
pub const ADDRESS_MAX_CHARS: usize = 200;

// Geo
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const DUPLICATE_RADIUS_M: f64 = 10.0;

// NAVER Cloud Platform map endpoints
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.apigw.ntruss.com/map-geocode/v2/geocode";
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.apigw.ntruss.com/map-direction-15/v1/driving";
pub const API_KEY_ID_HEADER: &str = "x-ncp-apigw-api-key-id";
pub const API_KEY_HEADER: &str = "x-ncp-apigw-api-key";
pub const OPTIMAL_ROUTE_OPTION: &str = "traoptimal";
pub const GEOCODE_STATUS_OK: &str = "OK";

//! Driving-directions response envelope.
//!
//! Mirrors the directions API JSON. Unknown fields are ignored and missing
//! ones fall back to defaults so a partial body still decodes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteResponse {
    pub code: i64,
    pub message: Option<String>,
    pub current_date_time: Option<String>,
    pub route: Option<Route>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    pub traoptimal: Vec<OptimalRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimalRoute {
    pub summary: RouteSummary,
    pub guide: Vec<Guide>,
    /// `[longitude, latitude]` pairs along the route.
    pub path: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteSummary {
    /// Meters
    pub distance: i64,
    /// Milliseconds
    pub duration: i64,
    pub toll_fare: i64,
    pub fuel_price: i64,
    pub departure_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guide {
    pub instructions: String,
    pub distance: i64,
    pub duration: i64,
}

impl RouteResponse {
    /// The first optimal route, if the provider reported success and returned one.
    pub fn optimal(&self) -> Option<&OptimalRoute> {
        if self.code != 0 {
            return None;
        }
        self.route.as_ref().and_then(|r| r.traoptimal.first())
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Route wizard parameter, with empty strings and the literal `"null"` the
/// pages send for a skipped step treated as absent.
pub fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "null")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "code": 0,
            "message": "길찾기를 성공하였습니다.",
            "currentDateTime": "2025-08-20T10:00:00",
            "route": {
                "traoptimal": [{
                    "summary": {
                        "start": {"location": [127.1, 37.4]},
                        "distance": 12850,
                        "duration": 1320000,
                        "tollFare": 0,
                        "fuelPrice": 1650,
                        "departureTime": "2025-08-20T10:00:00"
                    },
                    "guide": [
                        {"pointIndex": 3, "type": 3, "instructions": "성남대로 방면으로 우회전", "distance": 420, "duration": 61000}
                    ],
                    "path": [[127.1, 37.4], [127.11, 37.41]]
                }]
            }
        })
    }

    #[test]
    fn decodes_provider_payload() {
        let response: RouteResponse = serde_json::from_value(sample()).unwrap();
        let optimal = response.optimal().expect("route present");
        assert_eq!(optimal.summary.distance, 12850);
        assert_eq!(optimal.summary.fuel_price, 1650);
        assert_eq!(optimal.guide.len(), 1);
        assert_eq!(optimal.guide[0].distance, 420);
        assert_eq!(optimal.path[1], [127.11, 37.41]);
    }

    #[test]
    fn non_zero_code_means_no_route() {
        let mut body = sample();
        body["code"] = json!(1);
        let response: RouteResponse = serde_json::from_value(body).unwrap();
        assert!(response.optimal().is_none());
    }

    #[test]
    fn empty_optimal_list_means_no_route() {
        let response: RouteResponse =
            serde_json::from_value(json!({"code": 0, "route": {"traoptimal": []}})).unwrap();
        assert!(response.optimal().is_none());
    }

    #[test]
    fn error_body_without_route_decodes() {
        let response: RouteResponse =
            serde_json::from_value(json!({"code": 2, "message": "출발지와 도착지가 동일합니다."}))
                .unwrap();
        assert_eq!(response.code, 2);
        assert!(response.route.is_none());
        assert_eq!(response.message_or_empty(), "출발지와 도착지가 동일합니다.");
    }

    #[test]
    fn skipped_wizard_values_are_absent() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("null")), None);
        assert_eq!(present(Some("  ")), None);
        assert_eq!(present(Some(" 127.2,37.5 ")).as_deref(), Some("127.2,37.5"));
    }
}

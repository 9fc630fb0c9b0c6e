use crate::app::view_models::{
    CenterDetailView, CenterLocateView, CenterMainView, CenterUpdateView, LocationMarker,
    Navigation, QuarterView, RegionGroup, RouteResultView,
};
use crate::error::Result;
use askama::Template;
use serde::Serialize;

/// JSON for embedding in a `<script>` block. `<` is escaped so a value can
/// never close the tag.
pub fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub locations: Vec<LocationMarker>,
    pub markers_json: String,
}

#[derive(Template)]
#[template(path = "center_main.html")]
pub struct CenterMainTemplate {
    pub groups: Vec<RegionGroup<CenterMainView>>,
}

/// One sub-region link on the quarter page.
pub struct RegionTab {
    pub name: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "center_quarter.html")]
pub struct QuarterTemplate {
    pub area: String,
    pub regions: Vec<RegionTab>,
    pub locations: Vec<QuarterView>,
}

#[derive(Template)]
#[template(path = "center_choose_locate.html")]
pub struct ChooseLocateTemplate {
    pub groups: Vec<RegionGroup<CenterLocateView>>,
}

#[derive(Template)]
#[template(path = "center_locate.html")]
pub struct LocateTemplate {
    pub locations: Vec<CenterLocateView>,
    pub locations_json: String,
}

#[derive(Template)]
#[template(path = "center_create.html")]
pub struct CreateTemplate;

#[derive(Template)]
#[template(path = "center_detail.html")]
pub struct DetailTemplate {
    pub center: CenterDetailView,
}

#[derive(Template)]
#[template(path = "center_update.html")]
pub struct UpdateTemplate {
    pub id: i64,
    pub center: Option<CenterUpdateView>,
}

#[derive(Template)]
#[template(path = "nav_start.html")]
pub struct NavStartTemplate {
    pub groups: Vec<RegionGroup<CenterLocateView>>,
}

#[derive(Template)]
#[template(path = "nav_waypoints.html")]
pub struct NavWaypointsTemplate {
    pub groups: Vec<RegionGroup<CenterLocateView>>,
    pub nav: Navigation,
}

#[derive(Template)]
#[template(path = "nav_goal.html")]
pub struct NavGoalTemplate {
    pub groups: Vec<RegionGroup<CenterLocateView>>,
    pub nav: Navigation,
}

#[derive(Template)]
#[template(path = "nav_result.html")]
pub struct NavResultTemplate {
    pub nav: Navigation,
    pub route: Option<RouteResultView>,
    pub path_json: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

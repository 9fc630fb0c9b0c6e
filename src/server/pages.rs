//! Server-rendered pages under `/` and `/center`.

use crate::app::view_models::RouteResultView;
use crate::constants::REGIONS;
use crate::error::{CenterError, Result};
use crate::server::error::PageError;
use crate::server::state::AppState;
use crate::server::templates::*;
use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::warn;

type PageResult = std::result::Result<Html<String>, PageError>;

fn render<T: Template>(template: T) -> PageResult {
    Ok(Html(template.render()?))
}

/// Query string of the route wizard. Each step forwards what the previous
/// steps collected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavParams {
    pub start: Option<String>,
    pub start_name: Option<String>,
    pub waypoints: Option<String>,
    pub waypoint_names: Option<String>,
    pub goal: Option<String>,
    pub goal_name: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CenterError::invalid(format!("Missing required parameter: {name}")))
}

/// Accepts `ids=1&ids=2` as well as `ids=1,2`.
pub fn parse_ids(pairs: &[(String, String)]) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for (_, value) in pairs.iter().filter(|(k, _)| k == "ids") {
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse()
                .map_err(|_| CenterError::invalid(format!("Invalid location id: {part}")))?;
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(CenterError::invalid("Missing required parameter: ids"));
    }
    Ok(ids)
}

pub async fn index(State(state): State<AppState>) -> PageResult {
    let locations = state.views.markers().await?;
    let markers_json = script_json(&locations)?;
    render(IndexTemplate {
        locations,
        markers_json,
    })
}

pub async fn center_main(State(state): State<AppState>) -> PageResult {
    render(CenterMainTemplate {
        groups: state.views.main_groups().await?,
    })
}

pub async fn center_quarter(State(state): State<AppState>, Path(area): Path<String>) -> PageResult {
    let locations = state.views.quarter(&area).await?;
    render(QuarterTemplate {
        regions: REGIONS
            .iter()
            .map(|r| RegionTab {
                name: r.to_string(),
                active: *r == area,
            })
            .collect(),
        area,
        locations,
    })
}

pub async fn choose_locate(State(state): State<AppState>) -> PageResult {
    render(ChooseLocateTemplate {
        groups: state.views.locate_groups().await?,
    })
}

pub async fn locate(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> PageResult {
    let ids = parse_ids(&pairs)?;
    let locations = state.views.selected_locates(&ids).await?;
    let locations_json = script_json(&locations)?;
    render(LocateTemplate {
        locations,
        locations_json,
    })
}

pub async fn create_form() -> PageResult {
    render(CreateTemplate)
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    render(DetailTemplate {
        center: state.views.detail(id).await?,
    })
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    render(UpdateTemplate {
        id,
        center: state.views.update_form(id).await?,
    })
}

pub async fn nav_start(State(state): State<AppState>) -> PageResult {
    render(NavStartTemplate {
        groups: state.views.locate_groups().await?,
    })
}

pub async fn nav_waypoints(
    State(state): State<AppState>,
    Query(params): Query<NavParams>,
) -> PageResult {
    let nav = state.views.navigation_start(
        required(&params.start, "start")?,
        required(&params.start_name, "startName")?,
    );
    render(NavWaypointsTemplate {
        groups: state.views.locate_groups().await?,
        nav,
    })
}

pub async fn nav_goal(State(state): State<AppState>, Query(params): Query<NavParams>) -> PageResult {
    let nav = state.views.navigation_waypoints(
        required(&params.start, "start")?,
        required(&params.start_name, "startName")?,
        params.waypoints.as_deref(),
        params.waypoint_names.as_deref(),
    );
    render(NavGoalTemplate {
        groups: state.views.locate_groups().await?,
        nav,
    })
}

/// Route failures render inline on the result page instead of as an error page.
pub async fn nav_result(
    State(state): State<AppState>,
    Query(params): Query<NavParams>,
) -> PageResult {
    let nav = state
        .views
        .navigation_waypoints(
            required(&params.start, "start")?,
            required(&params.start_name, "startName")?,
            params.waypoints.as_deref(),
            params.waypoint_names.as_deref(),
        )
        .with_goal(
            required(&params.goal, "goal")?,
            required(&params.goal_name, "goalName")?,
        );

    let outcome = match state
        .directions
        .route(&nav.start, nav.waypoints.as_deref(), nav.goal.as_deref().unwrap_or_default())
        .await
    {
        Ok(response) => RouteResultView::from_response(&response),
        Err(e) => {
            warn!("Route search failed: {e}");
            Err(format!("route search failed: {e}"))
        }
    };

    let (route, error) = match outcome {
        Ok(view) => (Some(view), None),
        Err(message) => (None, Some(message)),
    };
    let path_json = match &route {
        Some(view) => script_json(&view.path)?,
        None => "[]".to_string(),
    };
    render(NavResultTemplate {
        nav,
        route,
        path_json,
        error,
    })
}

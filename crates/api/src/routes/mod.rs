pub mod health;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /survey/page                 page chrome, markdown sections, form
/// /survey/form                 form definition
/// /survey/responses            submit one response (POST)
/// /survey/tally                vote tally as chart data
/// /survey/tally/chart.svg      vote tally as an SVG bar chart
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/survey", survey::router())
}

//! Route definitions for the survey.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// Survey routes mounted at `/survey`.
///
/// ```text
/// GET    /page               -> get_page
/// GET    /form               -> get_form
/// POST   /responses          -> submit_response
/// GET    /tally              -> get_tally
/// GET    /tally/chart.svg    -> get_tally_chart
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/page", get(survey::get_page))
        .route("/form", get(survey::get_form))
        .route("/responses", post(survey::submit_response))
        .route("/tally", get(survey::get_tally))
        .route("/tally/chart.svg", get(survey::get_tally_chart))
}

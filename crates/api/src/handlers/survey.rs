//! Handlers for the survey page, submissions and the vote tally.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use survey_core::chart::BarChart;
use survey_core::error::CoreError;
use survey_core::form::{self, FormDefinition, PAGE_ICON, PAGE_TITLE};

use crate::content::{self, ContentSection};
use crate::error::{AppError, AppResult};
use crate::flow;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SurveyPage {
    pub title: &'static str,
    pub icon: &'static str,
    pub sections: Vec<ContentSection>,
    pub form: FormDefinition,
}

/// GET /api/v1/survey/page
///
/// Page chrome, the markdown sections and the form. Unreadable content
/// files appear as sections with an `error` instead of `markdown`.
pub async fn get_page(State(state): State<AppState>) -> Json<DataResponse<SurveyPage>> {
    let sections = content::load_page_sections(&state.config.content_dir).await;

    Json(DataResponse {
        data: SurveyPage {
            title: PAGE_TITLE,
            icon: PAGE_ICON,
            sections,
            form: form::survey_form(),
        },
    })
}

/// GET /api/v1/survey/form
pub async fn get_form() -> Json<DataResponse<FormDefinition>> {
    Json(DataResponse {
        data: form::survey_form(),
    })
}

/// POST /api/v1/survey/responses
///
/// Validate the form, store it as one row and return the refreshed chart.
///
/// The body is taken as untyped JSON so field types are checked after the
/// name. A body that is not JSON at all is a validation error.
pub async fn submit_response(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) =
        payload.map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;

    let outcome =
        flow::handle_submission(state.store.as_ref(), state.config.tally_strategy, body).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/survey/tally
pub async fn get_tally(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tally = flow::current_tally(state.store.as_ref(), state.config.tally_strategy).await?;

    Ok(Json(DataResponse {
        data: BarChart::from_tally(&tally),
    }))
}

/// GET /api/v1/survey/tally/chart.svg
pub async fn get_tally_chart(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tally = flow::current_tally(state.store.as_ref(), state.config.tally_strategy).await?;
    let svg = BarChart::from_tally(&tally).render_svg();

    Ok(([(CONTENT_TYPE, "image/svg+xml")], svg))
}

//! The survey request flow: collect, write, tally.
//!
//! [`handle_submission`] takes the posted form and either rejects it or
//! persists it and returns the refreshed tally. Steps run strictly in
//! order; a failure at one step means later steps do not run.

use serde::Serialize;
use serde_json::Value;
use survey_core::chart::BarChart;
use survey_core::survey::{SurveyForm, SurveyResponse};
use survey_core::tally::VoteTally;
use survey_db::{StoreError, SurveyStore};

use crate::config::TallyStrategy;
use crate::error::{AppError, AppResult};

pub const SAVED_MESSAGE: &str = "Your response has been successfully saved. Thank you!";

/// Result of a successful submission.
///
/// The row is already stored. If re-reading the tally failed afterwards,
/// `chart` is absent and `tally_error` says why; the submission itself
/// still succeeded.
#[derive(Debug, Serialize)]
pub struct SubmissionOutcome {
    pub response: SurveyResponse,
    pub message: &'static str,
    /// Client cue for a celebratory animation.
    pub celebrate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<BarChart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally_error: Option<String>,
}

/// Validate, persist and re-tally one submission posted as JSON.
///
/// - Invalid input, including a mistyped field, returns [`AppError::Name`]
///   or [`AppError::Core`]; the store is never touched.
/// - A store failure while saving returns [`AppError::SaveFailed`]; the
///   tally is not read.
pub async fn handle_submission(
    store: &dyn SurveyStore,
    strategy: TallyStrategy,
    body: Value,
) -> AppResult<SubmissionOutcome> {
    let response = SurveyForm::from_json(body)
        .and_then(SurveyForm::into_response)
        .inspect_err(|e| {
            tracing::info!(reason = %e, "Survey submission rejected");
        })?;

    store.ensure_table().await.map_err(AppError::SaveFailed)?;
    store
        .insert(&response)
        .await
        .map_err(AppError::SaveFailed)?;

    tracing::info!(
        slot = response.workshop_proposed_time.label(),
        "Survey response saved"
    );

    let (chart, tally_error) = match load_tally(store, strategy).await {
        Ok(tally) => (Some(BarChart::from_tally(&tally)), None),
        Err(e) => {
            let err = AppError::TallyFailed(e);
            tracing::error!(error = %err, "Tally refresh after submission failed");
            (None, Some(err.to_string()))
        }
    };

    Ok(SubmissionOutcome {
        response,
        message: SAVED_MESSAGE,
        celebrate: true,
        chart,
        tally_error,
    })
}

/// Rebuild the tally from the store, using the configured strategy.
pub async fn load_tally(
    store: &dyn SurveyStore,
    strategy: TallyStrategy,
) -> Result<VoteTally, StoreError> {
    match strategy {
        TallyStrategy::Client => Ok(VoteTally::from_slots(store.fetch_slots().await?)),
        TallyStrategy::Server => Ok(VoteTally::from_counts(store.count_by_slot().await?)),
    }
}

/// The tally as shown on a plain page view.
///
/// Creates the table first, so a store with no submissions yet reads as an
/// empty tally rather than a missing table.
pub async fn current_tally(
    store: &dyn SurveyStore,
    strategy: TallyStrategy,
) -> AppResult<VoteTally> {
    store.ensure_table().await.map_err(AppError::TallyFailed)?;
    load_tally(store, strategy)
        .await
        .map_err(AppError::TallyFailed)
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use survey_core::error::CoreError;
use survey_core::survey::{FormError, NameError, Severity};
use survey_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`NameError`] for rejected input and
/// [`StoreError`] for table store failures, split by whether the failure
/// happened while saving or while reading the tally. Malformed request
/// bodies arrive here as [`CoreError::Validation`]. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `survey_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The respondent's name failed validation.
    #[error(transparent)]
    Name(#[from] NameError),

    /// Creating the table or inserting the row failed.
    #[error("Error saving to the table store: {0}")]
    SaveFailed(#[source] StoreError),

    /// Reading the slot column failed.
    #[error("Error retrieving data from the table store: {0}")]
    TallyFailed(#[source] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Name(e) => AppError::Name(e),
            FormError::Invalid(e) => AppError::Core(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, severity) = match &self {
            // --- Rejected input ---
            AppError::Name(err) => {
                let code = match err {
                    NameError::Missing => "NAME_REQUIRED",
                    _ => "VALIDATION_ERROR",
                };
                (StatusCode::BAD_REQUEST, code, err.to_string(), Some(err.severity()))
            }
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                Some(Severity::Error),
            ),

            // --- Table store failures: shown to the user as-is ---
            AppError::SaveFailed(err) | AppError::TallyFailed(err) => {
                tracing::error!(error = %err, "Table store error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    self.to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(severity) = severity {
            body["severity"] = json!(severity);
        }

        (status, axum::Json(body)).into_response()
    }
}

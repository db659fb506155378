use std::sync::Arc;

use survey_db::SurveyStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Table store. Opens a fresh connection per operation.
    pub store: Arc<dyn SurveyStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

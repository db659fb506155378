//! The survey store seam and its PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use survey_core::survey::SurveyResponse;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::repositories::SurveyResponseRepo;

/// Everything the survey flow needs from the table store.
///
/// Implementations must not retry; a failure is reported once and the
/// caller decides what the user sees.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Create `survey_responses` if absent. Idempotent.
    async fn ensure_table(&self) -> Result<(), StoreError>;

    /// Append exactly one row.
    async fn insert(&self, response: &SurveyResponse) -> Result<(), StoreError>;

    /// Every stored workshop slot value, for client-side counting.
    async fn fetch_slots(&self) -> Result<Vec<String>, StoreError>;

    /// Votes per slot, counted by the store itself.
    async fn count_by_slot(&self) -> Result<Vec<(String, i64)>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// [`SurveyStore`] backed by PostgreSQL.
///
/// Holds only connection options. Each call opens a fresh connection, runs
/// one statement and closes the connection whether the statement succeeded
/// or not.
#[derive(Clone)]
pub struct PgSurveyStore {
    options: PgConnectOptions,
}

impl PgSurveyStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self {
            options: config.connect_options()?,
        })
    }

    /// Use prepared options directly (tests hand in a test database's options).
    pub fn from_options(options: PgConnectOptions) -> Self {
        Self { options }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        PgConnection::connect_with(&self.options)
            .await
            .map_err(StoreError::Connect)
    }
}

/// Close a connection, logging rather than propagating a close failure so
/// it never masks the statement's own result.
async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close table store connection");
    }
}

#[async_trait]
impl SurveyStore for PgSurveyStore {
    async fn ensure_table(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = SurveyResponseRepo::ensure_table(&mut conn)
            .await
            .map_err(StoreError::Schema);
        release(conn).await;
        result
    }

    async fn insert(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = SurveyResponseRepo::insert(&mut conn, response)
            .await
            .map_err(StoreError::Insert);
        release(conn).await;

        if result.is_ok() {
            tracing::debug!(
                slot = response.workshop_proposed_time.label(),
                "Survey response inserted"
            );
        }
        result
    }

    async fn fetch_slots(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connect().await?;
        let result = SurveyResponseRepo::list_slots(&mut conn)
            .await
            .map_err(StoreError::Query);
        release(conn).await;
        result
    }

    async fn count_by_slot(&self) -> Result<Vec<(String, i64)>, StoreError> {
        let mut conn = self.connect().await?;
        let result = SurveyResponseRepo::count_by_slot(&mut conn)
            .await
            .map_err(StoreError::Query);
        release(conn).await;
        result
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = conn.ping().await.map_err(StoreError::Query);
        release(conn).await;
        result
    }
}

/// Failure talking to the table store.
///
/// Transient and permanent failures are not distinguished; callers report
/// every variant the same way and never retry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error("could not connect to the table store: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("could not create the survey_responses table: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("could not insert the survey response: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("could not read survey responses: {0}")]
    Query(#[source] sqlx::Error),
}

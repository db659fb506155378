//! Persistence for survey submissions.
//!
//! There is no connection pool: every store operation opens
//! its own connection from [`StoreConfig`] and closes it when done.

pub mod config;
pub mod error;
pub mod repositories;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use store::{PgSurveyStore, SurveyStore};

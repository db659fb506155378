//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&mut PgConnection` as the first argument.

pub mod survey_response_repo;

pub use survey_response_repo::SurveyResponseRepo;

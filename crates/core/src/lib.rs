//! Domain logic for the workshop survey.
//!
//! Everything here is pure: option lists, name validation, form-to-record
//! conversion, vote tallies and chart rendering. Persistence lives in
//! `survey_db`, HTTP in `survey_api`.

pub mod chart;
pub mod error;
pub mod form;
pub mod options;
pub mod survey;
pub mod tally;

//! Workshop survey API server library.
//!
//! Exposes the building blocks (config, state, error handling, the
//! submission flow, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod content;
pub mod error;
pub mod flow;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

//! Backoffice API server library.
//!
//! Exposes the core building blocks (config, state, view registry, error
//! handling, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod response;
pub mod routes;
pub mod state;

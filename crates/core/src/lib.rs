//! Backoffice core: the generic CRUD view controller and the two entity
//! schemas (users and roles) it is instantiated with.
//!
//! Everything in this crate is synchronous and owns its state outright. The
//! HTTP layer decides where a [`manager::EntityManager`] lives and how long.

pub mod delete_gate;
pub mod entity;
pub mod error;
pub mod filter;
pub mod form;
pub mod manager;
pub mod pane;
pub mod role;
pub mod store;
pub mod types;
pub mod user;

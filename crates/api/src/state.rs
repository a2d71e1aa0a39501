use std::sync::Arc;

use backoffice_core::entity::Entity;
use backoffice_core::role::Role;
use backoffice_core::user::User;

use crate::config::ServerConfig;
use crate::registry::ViewRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Mounted users views.
    pub users: Arc<ViewRegistry<User>>,
    /// Mounted roles views.
    pub roles: Arc<ViewRegistry<Role>>,
}

impl AppState {
    /// Fresh state with no mounted views.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            users: Arc::new(ViewRegistry::new(config.max_open_views)),
            roles: Arc::new(ViewRegistry::new(config.max_open_views)),
            config: Arc::new(config),
        }
    }
}

/// An entity with a view registry in [`AppState`], and so an HTTP surface.
pub trait ManagedEntity: Entity {
    fn registry(state: &AppState) -> &ViewRegistry<Self>;
}

impl ManagedEntity for User {
    fn registry(state: &AppState) -> &ViewRegistry<Self> {
        &state.users
    }
}

impl ManagedEntity for Role {
    fn registry(state: &AppState) -> &ViewRegistry<Self> {
        &state.roles
    }
}

use std::collections::HashMap;

use backoffice_core::entity::Entity;
use backoffice_core::error::CoreError;
use backoffice_core::manager::EntityManager;
use backoffice_core::types::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A mounted view and its bookkeeping.
pub struct MountedView<E> {
    /// The view's entire state.
    pub manager: EntityManager<E>,
    /// When the view was mounted.
    pub mounted_at: Timestamp,
}

/// Owns every mounted view of one entity type.
///
/// A view is created by [`mount`](Self::mount) with a freshly seeded store and
/// lives until [`unmount`](Self::unmount). Views never share state. Thread-safe
/// via interior `RwLock`; designed to be wrapped in `Arc` and shared across
/// the application.
pub struct ViewRegistry<E> {
    views: RwLock<HashMap<Uuid, MountedView<E>>>,
    capacity: usize,
}

impl<E: Entity> ViewRegistry<E> {
    /// Create an empty registry holding at most `capacity` views.
    pub fn new(capacity: usize) -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Mount a new view and return its id.
    pub async fn mount(&self) -> Result<Uuid, CoreError> {
        let mut views = self.views.write().await;
        if views.len() >= self.capacity {
            return Err(CoreError::Conflict(format!(
                "Too many open {} views (limit {})",
                E::COLLECTION,
                self.capacity
            )));
        }

        let view_id = Uuid::new_v4();
        views.insert(
            view_id,
            MountedView {
                manager: EntityManager::new(),
                mounted_at: chrono::Utc::now(),
            },
        );
        Ok(view_id)
    }

    /// Discard a view. Returns `false` if it was not mounted.
    pub async fn unmount(&self, view_id: Uuid) -> bool {
        self.views.write().await.remove(&view_id).is_some()
    }

    /// Run one interaction against a view while holding the write lock.
    pub async fn with_view<R>(
        &self,
        view_id: Uuid,
        f: impl FnOnce(&mut EntityManager<E>) -> Result<R, CoreError>,
    ) -> Result<R, CoreError> {
        let mut views = self.views.write().await;
        let view = views.get_mut(&view_id).ok_or_else(|| CoreError::NotFound {
            entity: "View",
            id: view_id.to_string(),
        })?;
        f(&mut view.manager)
    }

    /// When a view was mounted, if it still is.
    pub async fn mounted_at(&self, view_id: Uuid) -> Option<Timestamp> {
        self.views.read().await.get(&view_id).map(|v| v.mounted_at)
    }

    /// Number of currently mounted views.
    pub async fn count(&self) -> usize {
        self.views.read().await.len()
    }
}

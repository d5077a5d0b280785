//! SessionStore - Single Source of Truth for the active session
//!
//! ## Responsibilities
//!
//! - Hold the active broker session (endpoint, tenant, registration id)
//! - Shared read access for the protocol adapters
//!
//! ## Design Principles
//!
//! - SSoT: no other module stores session state
//! - Only the registration service writes; everyone else reads snapshots

mod types;

pub use types::{
    AgentConfig, ContextBroker, Session, Tenant, SERVICE_HEADER, SERVICE_PATH_HEADER,
};

use tokio::sync::RwLock;

/// SessionStore instance
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create an empty store (no active session)
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Install a freshly activated session
    pub async fn set(&self, session: Session) {
        let mut guard = self.inner.write().await;
        *guard = Some(session);
    }

    /// Drop the active session, if any
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    /// Snapshot of the active session
    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    /// Registration id of the active session
    pub async fn registration_id(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.registration_id.clone())
    }

    /// Whether a session is active
    pub async fn is_active(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
